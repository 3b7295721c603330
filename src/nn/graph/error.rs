/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Graph 模块的错误类型
 */

use crate::nn::NodeId;

/// Graph 操作错误类型
#[derive(Debug, PartialEq, Eq)]
pub enum GraphError {
    NodeNotFound(NodeId),
    InvalidOperation(String),
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    ComputationError(String),
    DuplicateNodeName(String),
}
