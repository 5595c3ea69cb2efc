use std::str::FromStr;

/// One storage operation given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    Save { name: String, text: String },
    /// Save through the file manager instead of the backend directly.
    File { name: String, text: String },
    Load { name: String },
    Delete { name: String },
    List,
}

impl FromStr for StoreOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let verb = parts.next().unwrap_or_default();
        let name = parts.next().filter(|n| !n.is_empty());
        let text = parts.next();

        match (verb, name, text) {
            ("list", None, None) => Ok(Self::List),
            ("save", Some(name), Some(text)) => Ok(Self::Save {
                name: name.to_string(),
                text: text.to_string(),
            }),
            ("file", Some(name), Some(text)) => Ok(Self::File {
                name: name.to_string(),
                text: text.to_string(),
            }),
            ("load", Some(name), None) => Ok(Self::Load {
                name: name.to_string(),
            }),
            ("delete", Some(name), None) => Ok(Self::Delete {
                name: name.to_string(),
            }),
            _ => Err(format!(
                "invalid operation '{s}': expected save:NAME:TEXT, file:NAME:TEXT, load:NAME, delete:NAME or list"
            )),
        }
    }
}
