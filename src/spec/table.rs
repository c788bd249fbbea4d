use crate::error::{Result, SweepError};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// 문서에 나타난 순서를 그대로 유지하는 파라미터 테이블
///
/// 이름 조각은 키 순서로 만들어지므로 `HashMap`을 쓰면 실행할 때마다
/// 출력 이름이 달라집니다. 같은 테이블 안의 중복 키는 역직렬화 단계에서 거부합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ParamTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ParamTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목 추가. 이미 있는 키면 `false`를 반환하고 아무것도 바꾸지 않음
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn with(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 삽입 순서대로 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<T> ParamTable<Vec<T>> {
    /// 그룹 테이블의 공통 길이
    ///
    /// 빈 테이블은 `None`. 멤버들의 시퀀스 길이가 서로 다르거나
    /// 길이가 0이면 `MalformedSpecification`.
    pub fn aligned_len(&self, table: &str) -> Result<Option<usize>> {
        let mut iter = self.iter();
        let (first_key, first) = match iter.next() {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let len = first.len();
        if len == 0 {
            return Err(SweepError::malformed(format!(
                "{}: member `{}` has no entries",
                table, first_key
            )));
        }

        for (key, values) in iter {
            if values.len() != len {
                return Err(SweepError::malformed(format!(
                    "{}: member `{}` has {} entries but `{}` has {}",
                    table,
                    key,
                    values.len(),
                    first_key,
                    len
                )));
            }
        }

        Ok(Some(len))
    }
}

struct ParamTableVisitor<T> {
    marker: PhantomData<fn() -> ParamTable<T>>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ParamTableVisitor<T> {
    type Value = ParamTable<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of parameter names")
    }

    fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut table = ParamTable::new();

        // MapAccess는 문서 순서대로 키를 넘겨줌
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            if table.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate parameter `{}`", key)));
            }
            table.entries.push((key, value));
        }

        Ok(table)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ParamTable<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ParamTableVisitor {
            marker: PhantomData,
        })
    }
}
