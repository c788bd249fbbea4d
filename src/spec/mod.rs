pub mod table;

use crate::error::{Result, SweepError};
use serde::de::{self, Deserializer, IgnoredAny, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub use table::ParamTable;

/// 인코딩 스윕 파라미터 명세
///
/// JSON 문서 구조:
///
/// ```json
/// {
///   "exePath": "vpxenc",
///   "fullPath": "/in/clip.y4m",
///   "NonVar": { "NoArg": { "good": null }, "Arg": { "threads": "4" } },
///   "Var": {
///     "NoArg": { "preset": ["rt", "q"] },
///     "Arg": { "cpu-used": [0, 1, 2] },
///     "NoArgGrp": {},
///     "ArgGrp": {},
///     "MixGrp": {}
///   }
/// }
/// ```
///
/// 한 번 로드되면 변경되지 않습니다. 확장기는 명세를 읽기만 합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct Specification {
    /// 인코더 실행 파일 경로
    #[serde(rename = "exePath")]
    pub exe_path: String,

    /// 입력 미디어 경로. 파일 이름이 출력 이름의 시작이 됨
    #[serde(rename = "fullPath")]
    pub full_path: String,

    #[serde(rename = "NonVar", default)]
    pub fixed: FixedParams,

    #[serde(rename = "Var", default)]
    pub variable: VariableParams,
}

/// 모든 인코딩에 공통으로 붙는 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedParams {
    /// `--key`
    #[serde(rename = "NoArg", default)]
    pub flags: ParamTable<Present>,

    /// `--key=value`
    #[serde(rename = "Arg", default)]
    pub values: ParamTable<ParamValue>,
}

/// 인코딩마다 달라지는 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariableParams {
    /// 키 하나당 하나의 차원. 각 항목이 그대로 `--variant`가 됨
    #[serde(rename = "NoArg", default)]
    pub flags: ParamTable<Vec<ParamValue>>,

    /// 키 하나당 하나의 차원. `--key=value`
    #[serde(rename = "Arg", default)]
    pub values: ParamTable<Vec<ParamValue>>,

    /// 인덱스 정렬 그룹 (`--member[i]`)
    #[serde(rename = "NoArgGrp", default)]
    pub flag_groups: ParamTable<Vec<ParamValue>>,

    /// 인덱스 정렬 그룹 (`--key=value[i]`)
    #[serde(rename = "ArgGrp", default)]
    pub value_groups: ParamTable<Vec<ParamValue>>,

    /// 인덱스 정렬 그룹. 빈 키는 플래그, 나머지는 `--key=value[i]`
    #[serde(rename = "MixGrp", default)]
    pub mixed_groups: ParamTable<Vec<ParamValue>>,
}

/// `NonVar.NoArg`의 값 자리. 값은 무시됨 (보통 `null`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Present;

impl<'de> Deserialize<'de> for Present {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Present)
    }
}

/// 파라미터 값
///
/// 명세 파일에는 `"cpu-used": [0, 1, 2]`처럼 숫자나 불리언이 그대로 들어오는
/// 경우가 많아서 문자열로 정규화해서 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamValue(String);

impl ParamValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct ParamValueVisitor;

impl<'de> Visitor<'de> for ParamValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean parameter value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<ParamValue, E> {
        Ok(ParamValue(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ParamValueVisitor)
    }
}

impl Specification {
    pub fn new(exe_path: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            exe_path: exe_path.into(),
            full_path: full_path.into(),
            fixed: FixedParams::default(),
            variable: VariableParams::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 명세 파일 로드
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SweepError::IoError(io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;

        Self::from_json(&content)
    }

    pub fn with_executable(mut self, exe_path: impl Into<String>) -> Self {
        self.exe_path = exe_path.into();
        self
    }

    pub fn with_source(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = full_path.into();
        self
    }

    /// 출력 이름의 시작 부분
    ///
    /// 마지막 `/` 또는 `\` 뒤의 파일 이름에서 첫 번째 `.` 앞까지.
    /// `/in/clip.y4m` -> `clip`, `C:\media\foo.bar.y4m` -> `foo`
    pub fn base_name(&self) -> String {
        let file_name = self
            .full_path
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.full_path);

        file_name
            .split('.')
            .next()
            .unwrap_or(file_name)
            .to_string()
    }

    /// 확장 전에 구조적 불변식 검사
    ///
    /// - 가변 차원(`Var.NoArg`, `Var.Arg`)은 최소 하나의 옵션을 가져야 함
    /// - 그룹 테이블의 멤버들은 길이가 같고 0이 아니어야 함
    /// - 전체 조합 수가 `usize`를 넘지 않아야 함
    pub fn validate(&self) -> Result<()> {
        self.combination_count().map(|_| ())
    }

    /// 생성될 인코딩 개수 (비어있지 않은 모든 차원 크기의 곱)
    ///
    /// 차원이 늘어날수록 기하급수적으로 커지므로 실행 전에 확인하는 용도.
    pub fn combination_count(&self) -> Result<usize> {
        self.dimension_sizes()?
            .into_iter()
            .try_fold(1usize, |acc, size| acc.checked_mul(size))
            .ok_or_else(|| SweepError::malformed("combination count overflows usize"))
    }

    fn dimension_sizes(&self) -> Result<Vec<usize>> {
        let var = &self.variable;
        let mut sizes = Vec::new();

        for (table_name, table) in [("Var.NoArg", &var.flags), ("Var.Arg", &var.values)] {
            for (key, options) in table.iter() {
                if options.is_empty() {
                    return Err(SweepError::malformed(format!(
                        "{}: `{}` has no options",
                        table_name, key
                    )));
                }
                sizes.push(options.len());
            }
        }

        let groups = [
            ("Var.NoArgGrp", &var.flag_groups),
            ("Var.ArgGrp", &var.value_groups),
            ("Var.MixGrp", &var.mixed_groups),
        ];
        for (table_name, table) in groups {
            if let Some(len) = table.aligned_len(table_name)? {
                sizes.push(len);
            }
        }

        Ok(sizes)
    }
}
