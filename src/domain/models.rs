use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Shell-family platform split: darwin gets the daemon failsafe and the
/// full four-dotfile set, everything else gets `.bashrc` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Other,
}

#[derive(Serialize, Clone)]
pub struct AttrReport {
    pub attribute: String,
    pub passed: bool,
    /// Required-minus-present difference for set-valued attributes;
    /// empty for flag and identity checks.
    pub missing: Vec<String>,
    pub detail: Option<String>,
}

#[derive(Serialize)]
pub struct ConfReport {
    pub passed: bool,
    pub attributes: Vec<AttrReport>,
}

#[derive(Serialize, Clone)]
pub struct DotfileOutcome {
    pub dotfile: String,
    pub status: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
pub struct HookReport {
    pub tool_status: String,
    pub version: Option<String>,
    pub installed: bool,
    pub install_error: Option<String>,
    pub dotfiles: Vec<DotfileOutcome>,
    pub ready: bool,
}

#[derive(Serialize)]
pub struct ReadinessReport {
    pub app: String,
    pub conf: ConfReport,
    pub hooks: HookReport,
    pub ready: bool,
}
