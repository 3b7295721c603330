/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Variable 节点 - 计算图的叶子节点，形状在创建时声明，值可随时设置
 */

use super::TraitNode;
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

#[derive(Clone)]
pub(crate) struct Variable {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
}

impl Variable {
    pub(crate) fn new(shape: &[usize], init: bool) -> Result<Self, GraphError> {
        if shape.is_empty() {
            return Err(GraphError::InvalidOperation(
                "Variable 节点的形状不能为空".to_string(),
            ));
        }
        // 如果需要初始化，则使用（小方差）正态分布初始化
        let value = if init {
            Some(Tensor::normal(0.0, 0.001, shape))
        } else {
            None
        };

        Ok(Self {
            id: None,
            name: None,
            value,
            grad: None,
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for Variable {
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
        &self.shape
    }

    fn calc_value_by_parents(&mut self, _parents: &[NodeHandle]) -> Result<(), GraphError> {
        // Variable节点没有父节点，不需要计算值
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(v) = value {
            if v.shape() != self.shape.as_slice() {
                return Err(GraphError::ShapeMismatch {
                    expected: self.shape.clone(),
                    got: v.shape().to_vec(),
                    message: format!(
                        "Variable节点'{}'声明的形状为{:?}，但设置的值形状为{:?}",
                        self.name(),
                        self.shape,
                        v.shape()
                    ),
                });
            }
        }
        self.value = value.cloned();
        Ok(())
    }

    fn clear_value(&mut self) -> Result<(), GraphError> {
        self.value = None;
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        _upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(
            "Variable节点没有父节点".to_string(),
        ))
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
