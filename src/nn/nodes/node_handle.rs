/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : NodeHandle - 原始节点的统一包装，负责委托与 id/名称绑定
 */

use super::raw_node::{Add, MatMul, NodeType, Reshape, TraitNode, Transpose, Variable};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 节点在图中的唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Clone)]
pub(in crate::nn) struct NodeHandle {
    raw_node: NodeType,
    last_forward_pass_id: u64,
}

impl NodeHandle {
    fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
            last_forward_pass_id: 0,
        }
    }

    // ==================== 构造 ====================

    pub(in crate::nn) fn new_variable(shape: &[usize], init: bool) -> Result<Self, GraphError> {
        Ok(Self::new(Variable::new(shape, init)?))
    }

    pub(in crate::nn) fn new_add(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        Ok(Self::new(Add::new(parents)?))
    }

    pub(in crate::nn) fn new_mat_mul(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        Ok(Self::new(MatMul::new(parents)?))
    }

    pub(in crate::nn) fn new_reshape(
        parents: &[&NodeHandle],
        target_shape: &[i64],
    ) -> Result<Self, GraphError> {
        Ok(Self::new(Reshape::new(parents, target_shape)?))
    }

    pub(in crate::nn) fn new_transpose(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        Ok(Self::new(Transpose::new(parents)?))
    }

    /// 节点入图时由 Graph 统一绑定 id 与名称
    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.raw_node.set_id(id);
        self.raw_node.set_name(name);
    }

    // ==================== 委托 ====================

    pub(in crate::nn) fn id(&self) -> NodeId {
        self.raw_node.id()
    }

    pub(in crate::nn) fn name(&self) -> &str {
        self.raw_node.name()
    }

    pub(in crate::nn) fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.raw_node.value()
    }

    pub(in crate::nn) fn has_value(&self) -> bool {
        self.raw_node.value().is_some()
    }

    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_value(value)
    }

    pub(in crate::nn) fn clear_value(&mut self) -> Result<(), GraphError> {
        self.raw_node.clear_value()
    }

    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[NodeHandle],
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents)
    }

    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(target_parent, upstream_grad, assistant_parent)
    }

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.raw_node.grad()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_grad(grad)
    }

    pub(in crate::nn) fn clear_grad(&mut self) -> Result<(), GraphError> {
        self.raw_node.clear_grad()
    }

    // ==================== 前向传播记号 ====================

    pub(in crate::nn) fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) fn set_last_forward_pass_id(&mut self, pass_id: u64) {
        self.last_forward_pass_id = pass_id;
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "节点'{}'", self.name())
    }
}
