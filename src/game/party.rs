use serde::{Deserialize, Serialize};
use std::fmt;

/// The two political parties of the game. Policy cards carry one of these.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Liberal,
    Fascist,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Party::Liberal => "liberal",
            Party::Fascist => "fascist",
        })
    }
}
