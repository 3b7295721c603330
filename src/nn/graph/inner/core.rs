/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : GraphInner 核心操作 + 前向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::{NodeHandle, NodeType};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
            last_forward_pass_id: 0,
            next_id: 0,
        }
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(in crate::nn) fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_nodes(&self, ids: &[NodeId]) -> Result<Vec<&NodeHandle>, GraphError> {
        ids.iter().map(|&id| self.get_node(id)).collect()
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_children(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.forward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn has_node_value(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(id)?.has_value())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn set_node_value(&mut self, id: NodeId, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    /// 获取节点值的预期形状（节点创建时即确定，无需前向传播）
    pub fn get_node_value_expected_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        Ok(self.get_node(id)?.value_expected_shape())
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<Tensor>, GraphError> {
        Ok(self.get_node(id)?.grad().cloned())
    }

    /// 清零所有节点的梯度
    pub fn clear_grad(&mut self) -> Result<(), GraphError> {
        for node in self.nodes.values_mut() {
            node.clear_grad()?;
        }
        Ok(())
    }

    // ========== ID/名称生成 ==========

    pub(in crate::nn::graph) fn generate_valid_node_id(&mut self) -> NodeId {
        // 生成唯一的节点ID（先递增再返回，所以第一个节点 ID 是 1）
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub(in crate::nn::graph) fn check_duplicate_node_name(&self, name: &str) -> Result<(), GraphError> {
        if self.nodes.values().any(|node| node.name() == name) {
            return Err(GraphError::DuplicateNodeName(format!(
                "节点{}在图{}中重复",
                name,
                self.name()
            )));
        }
        Ok(())
    }

    pub(in crate::nn::graph) fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        if !base_name.is_empty() {
            self.check_duplicate_node_name(base_name)?;
            return Ok(base_name.to_string());
        }

        let mut counter = 1;
        loop {
            let name = format!("{node_type}_{counter}");
            if self.check_duplicate_node_name(&name).is_ok() {
                return Ok(name);
            }
            counter += 1;
        }
    }

    // ========== 前向传播 ==========

    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self.get_node(node_id)?;
        if let NodeType::Variable(_) = node.node_type() {
            if node.has_value() {
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "{node}是 Variable 类型，其值应通过 set_value 设置，而非通过父节点前向传播计算"
            )));
        }

        let new_graph_forward_pass_id = self.last_forward_pass_id + 1;
        self.forward_node_internal(node_id, new_graph_forward_pass_id)?;
        self.last_forward_pass_id = new_graph_forward_pass_id;
        Ok(())
    }

    fn forward_node_internal(
        &mut self,
        node_id: NodeId,
        new_graph_forward_pass_id: u64,
    ) -> Result<(), GraphError> {
        let node = self.get_node_mut(node_id)?;

        if let NodeType::Variable(_) = node.node_type() {
            if node.has_value() {
                node.set_last_forward_pass_id(new_graph_forward_pass_id);
                return Ok(());
            }
            return Err(GraphError::ComputationError(format!(
                "{node}没有值，请先通过 set_value 设置"
            )));
        }
        // 本轮前向传播中已经算过的节点直接复用
        if node.last_forward_pass_id() == new_graph_forward_pass_id {
            return Ok(());
        }

        let parents_ids = self.get_node_parents(node_id)?;
        for parent_id in &parents_ids {
            self.forward_node_internal(*parent_id, new_graph_forward_pass_id)?;
        }

        let parent_nodes = parents_ids
            .iter()
            .map(|id| self.get_node(*id).unwrap().clone())
            .collect::<Vec<NodeHandle>>();

        let node = self.get_node_mut(node_id)?;
        node.calc_value_by_parents(&parent_nodes)?;
        node.set_last_forward_pass_id(new_graph_forward_pass_id);

        Ok(())
    }
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
