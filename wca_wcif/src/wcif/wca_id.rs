use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Visitor;

/// A WCA id such as `2019ANDE01`: year of first competition, four letters, two digit counter.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct WcaId {
    pub year: u16,
    pub chars: [u8; 4],
    pub id: u8
}

impl std::fmt::Display for WcaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{}{:02}",
            self.year,
            self.chars.iter().map(|u|*u as char).collect::<String>(),
            self.id)
    }
}

impl std::str::FromStr for WcaId {
    type Err = String;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        if v.len() != 10 || !v.is_ascii() {
            return Err(format!("{v} is not a ten character WCA id"));
        }
        let year = v[0..4].parse::<u16>().map_err(|_| format!("The first four characters of {v} are not numerical"))?;
        let id = v[8..10].parse::<u8>().map_err(|_| format!("The last two characters of {v} are not numerical"))?;
        let mut chars = [0u8; 4];
        chars.copy_from_slice(v[4..8].as_bytes());
        Ok(WcaId { year, chars, id })
    }
}

impl<'de> Deserialize<'de> for WcaId {
    fn deserialize<D>(deserializer: D) -> Result<WcaId, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(WcaIdVisitor)
    }
}

struct WcaIdVisitor;

impl<'de> Visitor<'de> for WcaIdVisitor {
    type Value = WcaId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string consisting of 4 digits followed by 4 letters followed by 2 digits")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error, {
        v.parse().map_err(E::custom)
    }
}

impl Serialize for WcaId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod test {
    use super::WcaId;

    #[test]
    fn parses_and_prints() {
        let id: WcaId = "2019ANDE01".parse().unwrap();
        assert_eq!(id.year, 2019);
        assert_eq!(&id.chars, b"ANDE");
        assert_eq!(id.id, 1);
        assert_eq!(id.to_string(), "2019ANDE01");
    }

    #[test]
    fn rejects_malformed() {
        assert!("2019ANDE1".parse::<WcaId>().is_err());
        assert!("20X9ANDE01".parse::<WcaId>().is_err());
        assert!("2019ÅNDE0".parse::<WcaId>().is_err());
    }
}
