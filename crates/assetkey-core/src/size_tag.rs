use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Resized image variants
///
/// An asset without a size tag is the original upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTag {
    Sm,
    Md,
    Lg,
    Xl,
}

impl SizeTag {
    pub const ALL: [SizeTag; 4] = [SizeTag::Sm, SizeTag::Md, SizeTag::Lg, SizeTag::Xl];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTag::Sm => "sm",
            SizeTag::Md => "md",
            SizeTag::Lg => "lg",
            SizeTag::Xl => "xl",
        }
    }
}

impl FromStr for SizeTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sm" => Ok(SizeTag::Sm),
            "md" => Ok(SizeTag::Md),
            "lg" => Ok(SizeTag::Lg),
            "xl" => Ok(SizeTag::Xl),
            _ => Err(anyhow::anyhow!("Invalid size tag: {}", s)),
        }
    }
}

impl Display for SizeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags_case_insensitively() {
        assert_eq!("xl".parse::<SizeTag>().unwrap(), SizeTag::Xl);
        assert_eq!("MD".parse::<SizeTag>().unwrap(), SizeTag::Md);
        for tag in SizeTag::ALL {
            assert_eq!(tag.to_string().parse::<SizeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn rejects_unknown_tags() {
        assert!("xxl".parse::<SizeTag>().is_err());
        assert!("".parse::<SizeTag>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SizeTag::Lg).unwrap(), "\"lg\"");
    }
}
