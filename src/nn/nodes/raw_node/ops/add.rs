/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Add 节点 - 多个父节点逐元素相加
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Add 节点 - 所有父节点值的逐元素和
///
/// # 约束
/// - 至少 2 个父节点，且所有父节点的预期形状严格一致
#[derive(Clone)]
pub(crate) struct Add {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    target_shape: Vec<usize>,
}

impl Add {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() < 2 {
            return Err(GraphError::InvalidOperation(
                "Add 节点至少需要 2 个父节点".to_string(),
            ));
        }

        // 2. 验证所有父节点形状一致
        let first_shape = parents[0].value_expected_shape();
        for parent in &parents[1..] {
            let shape = parent.value_expected_shape();
            if shape != first_shape {
                return Err(GraphError::ShapeMismatch {
                    expected: first_shape.to_vec(),
                    got: shape.to_vec(),
                    message: format!(
                        "Add节点的父节点形状不一致：'{}'的形状为{:?}，'{}'的形状为{:?}",
                        parents[0].name(),
                        first_shape,
                        parent.name(),
                        shape
                    ),
                });
            }
        }

        Ok(Self {
            id: None,
            name: None,
            value: None,
            grad: None,
            target_shape: first_shape.to_vec(),
        })
    }
}

impl TraitNode for Add {
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
        let mut sum = Tensor::zeros(&self.target_shape);
        for parent in parents {
            let parent_value = parent.value().ok_or_else(|| {
                GraphError::ComputationError(format!(
                    "Add节点'{}'的父节点'{}'没有值",
                    self.name(),
                    parent.name()
                ))
            })?;
            sum = &sum + parent_value;
        }
        self.value = Some(sum);
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
        // 加法对每个父节点的导数都是1，梯度原样传递
        Ok(upstream_grad.clone())
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
