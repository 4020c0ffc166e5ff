//! Local precondition failures. These are raised before any request leaves
//! the page and are shown to the user as a toast.

use thiserror::Error;

use crate::busy::Control;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("no category selected")]
    NoCategorySelected,

    #[error("no editor tag is checked")]
    NothingChecked,

    #[error("no importable tags")]
    NothingToImport,

    #[error("no editor tag belongs to category {0}")]
    NoCategoryMatches(String),

    #[error("cursor index {index} out of range for {len} selected tags")]
    CursorOutOfRange { index: usize, len: usize },

    #[error("editor row {index} out of range for {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    #[error("unknown tag {0}")]
    UnknownTag(String),

    #[error("unknown category {0}")]
    UnknownCategory(String),

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("action `{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} is already running")]
    Busy(Control),

    #[error("input is empty")]
    EmptyInput,
}

pub type FlowResult<T> = Result<T, FlowError>;

impl FlowError {
    /// Localized message for the toast line.
    pub fn notice(&self) -> String {
        match self {
            FlowError::NoCategorySelected => "请先选择一个分类".to_string(),
            FlowError::NothingChecked => "请先勾选要添加的标签".to_string(),
            FlowError::NothingToImport => "没有可导入的新标签".to_string(),
            FlowError::NoCategoryMatches(_) => "没有属于该分类的标签".to_string(),
            FlowError::CursorOutOfRange { .. } | FlowError::RowOutOfRange { .. } => {
                "位置无效".to_string()
            }
            FlowError::UnknownTag(_) => "标签不存在".to_string(),
            FlowError::UnknownCategory(_) => "分类不存在".to_string(),
            FlowError::Busy(_) => "请求进行中，请稍候".to_string(),
            FlowError::EmptyInput => "请输入内容".to_string(),
            FlowError::UnknownAction(_)
            | FlowError::MissingArgument(_)
            | FlowError::InvalidArgument(_) => format!("操作无效: {self}"),
        }
    }
}
