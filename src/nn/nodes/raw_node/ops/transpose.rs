/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Transpose 节点 - 交换矩阵的两个维度
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Transpose 节点 - 父节点值的转置
///
/// # 特性
/// - Forward: 交换输入矩阵的行与列
/// - Backward (Gradient): 上游梯度转置回去即可（转置是线性且自逆的）
///
/// # 约束
/// - 父节点的预期形状必须是 2 阶（矩阵）
#[derive(Clone)]
pub(crate) struct Transpose {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    /// 转置后的形状
    target_shape: Vec<usize>,
}

impl Transpose {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "Transpose 节点只需要 1 个父节点".to_string(),
            ));
        }

        // 2. 验证父节点为矩阵
        let parent_shape = parents[0].value_expected_shape();
        if parent_shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: parent_shape.len(),
                message: format!(
                    "Transpose 节点要求父节点为 2 阶张量（矩阵），但得到形状 {parent_shape:?}"
                ),
            });
        }

        Ok(Self {
            id: None,
            name: None,
            value: None,
            grad: None,
            target_shape: vec![parent_shape[1], parent_shape[0]],
        })
    }
}

impl TraitNode for Transpose {
    fn id(&self) -> NodeId {
        self.id.unwrap()
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<未命名>")
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.target_shape
    }

    fn calc_value_by_parents(&mut self, parents: &[NodeHandle]) -> Result<(), GraphError> {
        let parent_value = parents[0].value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "Transpose节点'{}'的父节点'{}'没有值",
                self.name(),
                parents[0].name()
            ))
        })?;

        self.value = Some(parent_value.transpose());
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) -> Result<(), GraphError> {
        self.value = None;
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.transpose())
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
