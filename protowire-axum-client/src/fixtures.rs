//! Message types shared by the client tests.

#[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Greeting {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint32, tag = "2")]
    pub repeat: u32,
}

impl prost::Name for Greeting {
    const NAME: &'static str = "Greeting";
    const PACKAGE: &'static str = "acme.v1";
}

#[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Farewell {
    #[prost(string, tag = "1")]
    pub reason: String,
}

impl prost::Name for Farewell {
    const NAME: &'static str = "Farewell";
    const PACKAGE: &'static str = "acme.v1";
}

pub fn greeting() -> Greeting {
    Greeting {
        name: "ada".to_string(),
        repeat: 2,
    }
}
