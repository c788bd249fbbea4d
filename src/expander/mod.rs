//! 파라미터 명세 -> (명령어 조각, 이름 조각)
//!
//! 가변 차원 하나를 처리할 때마다 조각 개수는 그 차원의 옵션 수만큼 곱해집니다.
//! 길이 L인 조각 목록에 옵션 G개짜리 차원을 적용하면 L x G개가 되므로,
//! 최종 개수는 비어있지 않은 모든 차원 크기의 곱입니다. 차원이 많은 명세는
//! 매우 큰 스윕을 만든다는 점에 주의하세요 (`Specification::combination_count`).

pub mod group;
pub mod stage;

use crate::error::Result;
use crate::spec::Specification;
use group::Variant;
use tracing::debug;

pub use stage::Stage;

/// 확장 결과: 같은 인덱스끼리 대응하는 명령어와 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    commands: Vec<String>,
    names: Vec<String>,
}

impl Expansion {
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// (명령어, 이름) 쌍 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .zip(&self.names)
            .map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.commands, self.names)
    }
}

/// 확장 중의 작업 상태
///
/// 두 목록의 길이는 항상 같습니다.
#[derive(Debug)]
struct Fragments {
    commands: Vec<String>,
    names: Vec<String>,
}

impl Fragments {
    fn seed(spec: &Specification) -> Self {
        Self {
            commands: vec![spec.exe_path.clone()],
            names: vec![spec.base_name()],
        }
    }

    fn len(&self) -> usize {
        self.commands.len()
    }

    /// 이름은 건드리지 않고 모든 명령어 뒤에 붙임
    fn append_to_commands(&mut self, suffix: &str) {
        for command in &mut self.commands {
            command.push_str(suffix);
        }
    }

    /// 기존 조각 하나하나에 모든 옵션을 결합 (기존 순서가 바깥 루프)
    fn cross(self, variants: &[Variant]) -> Self {
        if variants.is_empty() {
            return self;
        }

        let capacity = self.len() * variants.len();
        let mut commands = Vec::with_capacity(capacity);
        let mut names = Vec::with_capacity(capacity);

        for (command, name) in self.commands.iter().zip(&self.names) {
            for variant in variants {
                commands.push(format!("{}{}", command, variant.command));
                names.push(format!("{}{}", name, variant.name));
            }
        }

        Self { commands, names }
    }
}

impl From<Fragments> for Expansion {
    fn from(fragments: Fragments) -> Self {
        Self {
            commands: fragments.commands,
            names: fragments.names,
        }
    }
}

/// 명세를 전체 명령어/이름 목록으로 확장
///
/// 명세가 잘못되었으면 아무 출력도 만들지 않고 `MalformedSpecification`을 반환합니다.
///
/// # Examples
/// ```
/// use encsweep::expander::expand;
/// use encsweep::spec::Specification;
///
/// let spec = Specification::from_json(r#"{
///     "exePath": "vpxenc",
///     "fullPath": "/in/clip.y4m",
///     "NonVar": { "NoArg": { "good": null } },
///     "Var": { "NoArg": { "preset": ["rt", "q"] } }
/// }"#).unwrap();
///
/// let expansion = expand(&spec).unwrap();
/// assert_eq!(expansion.commands(), ["vpxenc --good --rt /in/clip.y4m", "vpxenc --good --q /in/clip.y4m"]);
/// assert_eq!(expansion.names(), ["clip_rt", "clip_q"]);
/// ```
pub fn expand(spec: &Specification) -> Result<Expansion> {
    spec.validate()?;

    let mut fragments = Fragments::seed(spec);
    for stage in Stage::PIPELINE {
        fragments = apply_stage(fragments, spec, stage)?;
        debug_assert_eq!(fragments.commands.len(), fragments.names.len());
        if stage.multiplies() {
            debug!(stage = %stage, fragments = fragments.len(), "dimension expanded");
        }
    }

    Ok(fragments.into())
}

fn apply_stage(mut fragments: Fragments, spec: &Specification, stage: Stage) -> Result<Fragments> {
    let var = &spec.variable;

    let fragments = match stage {
        Stage::FixedFlags => {
            let suffix: String = spec.fixed.flags.keys().map(|k| format!(" --{}", k)).collect();
            fragments.append_to_commands(&suffix);
            fragments
        }
        Stage::FixedValues => {
            let suffix: String = spec
                .fixed
                .values
                .iter()
                .map(|(k, v)| format!(" --{}={}", k, v))
                .collect();
            fragments.append_to_commands(&suffix);
            fragments
        }
        Stage::VariableFlags => var.flags.iter().fold(fragments, |acc, (_, options)| {
            let variants: Vec<Variant> = options.iter().map(|o| Variant::flag(o.as_str())).collect();
            acc.cross(&variants)
        }),
        Stage::VariableValues => var.values.iter().fold(fragments, |acc, (key, options)| {
            let variants: Vec<Variant> = options
                .iter()
                .map(|o| Variant::value(key, o.as_str()))
                .collect();
            acc.cross(&variants)
        }),
        Stage::FlagGroups => fragments.cross(&group::flag_group(&var.flag_groups)?),
        Stage::ValueGroups => fragments.cross(&group::value_group(&var.value_groups)?),
        Stage::MixedGroups => fragments.cross(&group::mixed_group(&var.mixed_groups)?),
        Stage::Source => {
            fragments.append_to_commands(&format!(" {}", spec.full_path));
            fragments
        }
    };

    Ok(fragments)
}
