use crate::error::Result;
use crate::spec::{ParamTable, ParamValue};

/// 한 차원의 옵션 하나가 명령어/이름에 덧붙이는 텍스트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub command: String,
    pub name: String,
}

impl Variant {
    /// `--flag` / `_flag`
    pub fn flag(flag: &str) -> Self {
        Self {
            command: format!(" --{}", flag),
            name: format!("_{}", flag),
        }
    }

    /// `--key=value` / `_key=value`
    pub fn value(key: &str, value: &str) -> Self {
        Self {
            command: format!(" --{}={}", key, value),
            name: format!("_{}={}", key, value),
        }
    }

    fn push(&mut self, other: Variant) {
        self.command.push_str(&other.command);
        self.name.push_str(&other.name);
    }
}

/// `Var.NoArgGrp`: 인덱스 i마다 모든 멤버의 `--member[i]`를 이어붙임
pub fn flag_group(table: &ParamTable<Vec<ParamValue>>) -> Result<Vec<Variant>> {
    combine(table, "Var.NoArgGrp", |_, value| Variant::flag(value))
}

/// `Var.ArgGrp`: 인덱스 i마다 `--key=value[i]`
pub fn value_group(table: &ParamTable<Vec<ParamValue>>) -> Result<Vec<Variant>> {
    combine(table, "Var.ArgGrp", Variant::value)
}

/// `Var.MixGrp`: 빈 키는 값 자체가 플래그, 나머지는 `--key=value[i]`
pub fn mixed_group(table: &ParamTable<Vec<ParamValue>>) -> Result<Vec<Variant>> {
    combine(table, "Var.MixGrp", |key, value| {
        if key.is_empty() {
            Variant::flag(value)
        } else {
            Variant::value(key, value)
        }
    })
}

/// 인덱스 정렬 조합. 멤버 사이에서는 곱집합을 만들지 않음
///
/// 멤버 수와 관계없이 결과 길이는 공통 시퀀스 길이와 같음.
fn combine<F>(table: &ParamTable<Vec<ParamValue>>, table_name: &str, render: F) -> Result<Vec<Variant>>
where
    F: Fn(&str, &str) -> Variant,
{
    let len = match table.aligned_len(table_name)? {
        Some(len) => len,
        None => return Ok(Vec::new()),
    };

    let combined = (0..len)
        .map(|i| {
            let mut variant = Variant {
                command: String::new(),
                name: String::new(),
            };
            for (key, values) in table.iter() {
                variant.push(render(key, values[i].as_str()));
            }
            variant
        })
        .collect();

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    fn values(items: &[&str]) -> Vec<ParamValue> {
        items.iter().map(|s| ParamValue::from(*s)).collect()
    }

    #[test]
    fn test_flag_group_is_index_aligned() {
        let table = ParamTable::new()
            .with("mode", values(&["rt", "good", "best"]))
            .with("tune", values(&["psnr", "ssim", "psnr"]));

        let combined = flag_group(&table).unwrap();

        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].command, " --rt --psnr");
        assert_eq!(combined[0].name, "_rt_psnr");
        assert_eq!(combined[2].command, " --best --psnr");
    }

    #[test]
    fn test_value_group() {
        let table = ParamTable::new()
            .with("end-usage", values(&["vbr", "cq"]))
            .with("target-bitrate", values(&["1000", "2000"]));

        let combined = value_group(&table).unwrap();

        assert_eq!(
            combined,
            vec![
                Variant {
                    command: " --end-usage=vbr --target-bitrate=1000".to_string(),
                    name: "_end-usage=vbr_target-bitrate=1000".to_string(),
                },
                Variant {
                    command: " --end-usage=cq --target-bitrate=2000".to_string(),
                    name: "_end-usage=cq_target-bitrate=2000".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_mixed_group_empty_key_is_flag() {
        let table = ParamTable::new()
            .with("", values(&["rt", "good"]))
            .with("pass", values(&["1", "2"]));

        let combined = mixed_group(&table).unwrap();

        assert_eq!(combined[0].command, " --rt --pass=1");
        assert_eq!(combined[0].name, "_rt_pass=1");
        assert_eq!(combined[1].command, " --good --pass=2");
        assert_eq!(combined[1].name, "_good_pass=2");
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let table = ParamTable::new();
        assert!(flag_group(&table).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_members() {
        let table = ParamTable::new()
            .with("a", values(&["x", "y"]))
            .with("b", values(&["p", "q", "r"]));

        let err = flag_group(&table).unwrap_err();
        assert!(matches!(err, SweepError::MalformedSpecification(_)));
        assert!(err.to_string().contains("Var.NoArgGrp"));
    }
}
