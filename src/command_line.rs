use clap::Parser;

use crate::catalog::DEFAULT_PREFIX;

/// Create the Gravitee.io APIM DynamoDB tables that do not exist yet.
///
/// Credentials and region are read from `config.json` in the working
/// directory when present, otherwise from the standard AWS environment
/// (`AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_ENDPOINT_URL`, ...).
#[derive(Debug, Parser)]
#[command(name = "apim-dynamodb-setup", version)]
pub struct Args {
    /// Table name prefix
    #[arg(value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl Args {
    /// The prefix to use, falling back to the default when missing or blank.
    pub fn prefix(&self) -> &str {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.trim().is_empty() => prefix,
            _ => DEFAULT_PREFIX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prefix_when_omitted() {
        let args = Args::try_parse_from(["apim-dynamodb-setup"]).unwrap();
        assert_eq!(args.prefix(), "GraviteeioApim");
    }

    #[test]
    fn uses_positional_prefix() {
        let args = Args::try_parse_from(["apim-dynamodb-setup", "Test"]).unwrap();
        assert_eq!(args.prefix(), "Test");
    }

    #[test]
    fn blank_prefix_falls_back_to_default() {
        let args = Args::try_parse_from(["apim-dynamodb-setup", "  "]).unwrap();
        assert_eq!(args.prefix(), DEFAULT_PREFIX);
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(Args::try_parse_from(["apim-dynamodb-setup", "Test", "More"]).is_err());
    }
}
