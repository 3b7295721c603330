/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 原始节点（raw node）：节点 trait 与节点类型枚举
 */

mod ops;
mod variable;

pub(in crate::nn) use ops::{Add, MatMul, Reshape, Transpose};
pub(in crate::nn) use variable::Variable;

use super::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Clone)]
pub(in crate::nn) enum NodeType {
    Variable(Variable),
    Add(Add),
    MatMul(MatMul),
    Reshape(Reshape),
    Transpose(Transpose),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    fn id(&self) -> NodeId;

    fn set_id(&mut self, id: NodeId);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    /// 节点值的预期形状。在节点创建时就已确定（先定义后执行），
    /// 无需等到前向传播后才能获知。
    fn value_expected_shape(&self) -> &[usize];

    /// 根据父节点的值计算本节点的值
    /// 注意：由于该接口只在Graph中使用，所以实现时不用关心父节点的值是否已被计算，
    /// 所有父节点的值可以已预先被计算过了
    fn calc_value_by_parents(&mut self, parents: &[NodeHandle]) -> Result<(), GraphError>;

    fn value(&self) -> Option<&Tensor>;

    fn set_value(&mut self, _value: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "节点'{}'的值由父节点计算得出，不应被手动设置",
            self.name()
        )))
    }

    fn clear_value(&mut self) -> Result<(), GraphError>;

    /// 计算本节点对指定父节点的梯度贡献（VJP：上游梯度 × 本节点对该父节点的导数）
    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError>;

    fn grad(&self) -> Option<&Tensor>;

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError>;

    fn clear_grad(&mut self) -> Result<(), GraphError> {
        self.set_grad(None)
    }
}
