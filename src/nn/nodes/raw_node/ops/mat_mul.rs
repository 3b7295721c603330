/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : MatMul 节点 - 矩阵乘法
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// MatMul 节点 - 两个父节点（矩阵）的乘积
///
/// # 特性
/// - Forward: C = A·B
/// - Backward (Gradient): dA = G·Bᵀ，dB = Aᵀ·G
///
/// # 约束
/// - 两个父节点的预期形状必须都是 2 阶，且 A 的列数等于 B 的行数
#[derive(Clone)]
pub(crate) struct MatMul {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    /// 结果形状 [m, p]
    target_shape: Vec<usize>,
    parents_ids: Vec<NodeId>, // NOTE: 注意顺序
}

impl MatMul {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "MatMul 节点需要 2 个父节点".to_string(),
            ));
        }

        // 2. 验证两个父节点都是矩阵
        for parent in parents {
            let shape = parent.value_expected_shape();
            if shape.len() != 2 {
                return Err(GraphError::DimensionMismatch {
                    expected: 2,
                    got: shape.len(),
                    message: format!(
                        "MatMul 节点要求父节点'{}'为 2 阶张量（矩阵），但得到形状 {shape:?}",
                        parent.name()
                    ),
                });
            }
        }

        // 3. 验证矩阵乘法的形状兼容性
        let left_shape = parents[0].value_expected_shape();
        let right_shape = parents[1].value_expected_shape();
        if left_shape[1] != right_shape[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left_shape[0], right_shape[1]],
                got: vec![left_shape[1], right_shape[0]],
                message: format!(
                    "MatMul节点的2个父节点形状不兼容：父节点1的列数({})与父节点2的行数({})不相等。",
                    left_shape[1], right_shape[0],
                ),
            });
        }

        Ok(Self {
            id: None,
            name: None,
            value: None,
            grad: None,
            target_shape: vec![left_shape[0], right_shape[1]],
            parents_ids: vec![parents[0].id(), parents[1].id()],
        })
    }
}

impl TraitNode for MatMul {
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
        let parent1_value = parents[0].value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "MatMul节点'{}'的父节点'{}'没有值",
                self.name(),
                parents[0].name()
            ))
        })?;
        let parent2_value = parents[1].value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "MatMul节点'{}'的父节点'{}'没有值",
                self.name(),
                parents[1].name()
            ))
        })?;

        self.value = Some(parent1_value.mat_mul(parent2_value));
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
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        let other = assistant_parent.ok_or_else(|| {
            GraphError::ComputationError("MatMul 反向传播需要另一个父节点的值".to_string())
        })?;
        let other_value = other.value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "MatMul节点'{}'的父节点'{}'没有值",
                self.name(),
                other.name()
            ))
        })?;

        // 根据父节点位置计算梯度：C = A·B
        if target_parent.id() == self.parents_ids[0] {
            // dC/dA = G·Bᵀ
            Ok(upstream_grad.mat_mul(&other_value.transpose()))
        } else if target_parent.id() == self.parents_ids[1] {
            // dC/dB = Aᵀ·G
            Ok(other_value.transpose().mat_mul(upstream_grad))
        } else {
            Err(GraphError::ComputationError(format!(
                "节点id `{:?}` 不是当前节点的父节点id `{:?}` 或 `{:?}`",
                target_parent.id(),
                self.parents_ids[0],
                self.parents_ids[1]
            )))
        }
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
