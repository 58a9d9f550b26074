// SPDX-License-Identifier: MIT
//
// Errors from contrast passes.
//
// `NoRoot` and an unknown pass root are setup failures and end the pass.
// Everything else is per-element: the pass logs it, counts it as skipped,
// and moves on.

use petal_color::CssError;
use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum ContrastError {
    #[error("visual tree has no document root")]
    NoRoot,

    #[error("{0} is not in the visual tree")]
    UnknownNode(NodeId),

    #[error("overlay on {0} was not inserted by this tree")]
    UnknownOverlay(NodeId),

    #[error("malformed style value: {0}")]
    Css(#[from] CssError),

    #[error("invalid tree description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContrastError>;
