/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 负责计算图（computation graph）的构建与执行
 */

mod graph;
mod nodes;
mod var;

pub use graph::{Graph, GraphError, GraphInner};
pub use nodes::NodeId;
pub use var::Var;

#[cfg(test)]
mod tests;
