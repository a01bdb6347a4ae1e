// Child gender value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildGender {
    Boy,
    Girl,
}

impl ChildGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildGender::Boy => "boy",
            ChildGender::Girl => "girl",
        }
    }
}
