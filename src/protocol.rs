//! Wire types shared by the server and the client.
//!
//! | Method | Path        | Input                                   | Success                   |
//! |--------|-------------|-----------------------------------------|---------------------------|
//! | POST   | `/create`   | query `name` (default ""), `uuid` (bool) | `{"bin-name": "<id>"}`    |
//! | GET    | `/retrieve` | query `name`                            | raw text                  |
//! | PUT    | `/update`   | query `name`, body `{"content": "..."}` | empty body                |
//!
//! Every error response is `{"detail": "<message>"}`.

use serde::{Deserialize, Serialize};

pub const CREATE_PATH: &str = "/create";
pub const RETRIEVE_PATH: &str = "/retrieve";
pub const UPDATE_PATH: &str = "/update";

/// Query parameters for `POST /create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uuid: bool,
}

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "bin-name")]
    pub bin_name: String,
}

/// Query parameters for `GET /retrieve` and `PUT /update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParams {
    #[serde(default)]
    pub name: String,
}

/// Body of `PUT /update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBody {
    pub content: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
