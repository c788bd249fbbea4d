use crate::error::SweepError;
use std::fmt;
use std::str::FromStr;

/// 확장 단계
///
/// 순서는 고정입니다. 그룹 확장은 고정 파라미터 문자열이 만들어진 뒤에
/// 실행되어야 이름이 결정적으로 만들어집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// `NonVar.NoArg` -> 모든 명령어에 `--key`
    FixedFlags,
    /// `NonVar.Arg` -> 모든 명령어에 `--key=value`
    FixedValues,
    /// `Var.NoArg` -> 키마다 곱집합
    VariableFlags,
    /// `Var.Arg` -> 키마다 곱집합
    VariableValues,
    /// `Var.NoArgGrp` -> 인덱스 정렬 조합과 곱집합
    FlagGroups,
    /// `Var.ArgGrp`
    ValueGroups,
    /// `Var.MixGrp`
    MixedGroups,
    /// 모든 명령어 끝에 소스 경로
    Source,
}

impl Stage {
    pub const PIPELINE: [Stage; 8] = [
        Stage::FixedFlags,
        Stage::FixedValues,
        Stage::VariableFlags,
        Stage::VariableValues,
        Stage::FlagGroups,
        Stage::ValueGroups,
        Stage::MixedGroups,
        Stage::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FixedFlags => "nonVarNoArg",
            Stage::FixedValues => "nonVarArg",
            Stage::VariableFlags => "varNoArg",
            Stage::VariableValues => "varArg",
            Stage::FlagGroups => "varNoArgGrp",
            Stage::ValueGroups => "varArgGrp",
            Stage::MixedGroups => "varMixGrp",
            Stage::Source => "addSource",
        }
    }

    /// 이 단계가 조각 개수를 늘릴 수 있는지 여부
    pub fn multiplies(&self) -> bool {
        !matches!(
            self,
            Stage::FixedFlags | Stage::FixedValues | Stage::Source
        )
    }
}

impl FromStr for Stage {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::PIPELINE
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| SweepError::UnsupportedStageType(s.to_string()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
