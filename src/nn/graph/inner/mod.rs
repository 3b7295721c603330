/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : GraphInner - 计算图的底层实现
 */

mod backward;
mod core;
mod node_builders;

use crate::nn::nodes::NodeHandle;
use crate::nn::NodeId;
use std::collections::HashMap;

/// 计算图的底层实现。
/// 节点与边都存在这里；用户一般通过 `Graph`/`Var` 句柄间接使用。
pub struct GraphInner {
    name: String,
    nodes: HashMap<NodeId, NodeHandle>,
    /// 父节点 -> 子节点列表
    forward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 子节点 -> 父节点列表
    backward_edges: HashMap<NodeId, Vec<NodeId>>,
    last_forward_pass_id: u64,
    next_id: u64,
}
