//! One-line diagnosis for a failed link: classification plus message, so
//! an operator scanning logs can tell "this link lost its radio model"
//! from "this link's netns disappeared" without opening a debugger.

use tracing::warn;

pub fn classify_and_log(link_id: &str, classification: &str, message: &str) {
    warn!(link_id, classification, message, "link degraded");
}
