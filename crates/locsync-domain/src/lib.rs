use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileStats {
    pub path: String,
    pub language: String,
    pub none: usize,
    pub new: usize,
    pub modified: usize,
    pub deprecated: usize,
    /// none + new + modified
    pub total: usize,
    pub percent_complete: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StatsReport {
    pub schema_version: u32,
    pub files: Vec<FileStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateFileStat {
    pub path: String,
    pub language: String,
    /// updated / unchanged / planned / skipped
    pub status: String,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deprecated: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateSummary {
    pub schema_version: u32,
    pub primary: String,
    pub primary_keys: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub files: Vec<UpdateFileStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationMsg {
    pub schema_version: u32,
    pub kind: String,
    pub key: String,
    pub path: String,
    /// 1-based row in the file, header is row 1
    pub line: Option<usize>,
    pub message: String,
}
