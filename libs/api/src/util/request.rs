use serde::Deserialize;
use serde_with::serde_as;
use serde_with::DisplayFromStr;
use utoipa::IntoParams;

use crate::response::FieldError;

pub const MAX_LIMIT: u64 = 100;

#[serde_as]
#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of results to return (1-100)
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u64,
    /// Number of results to skip
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    #[param(minimum = 0, default = 0)]
    pub offset: u64,
}

impl Pagination {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if (1..=MAX_LIMIT).contains(&self.limit) {
            return Ok(());
        }

        Err(vec![FieldError::new(
            "query",
            "limit",
            format!("Input should be between 1 and {}", MAX_LIMIT),
        )])
    }
}

fn default_limit() -> u64 {
    10
}
