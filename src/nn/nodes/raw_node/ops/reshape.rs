/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Reshape 节点 - 改变张量形状而不改变数据
 *
 * 目标形状以`i64`给出，支持 SameDiff/NumPy 风格的`-1`维度推断：
 * 最多一个`-1`，其大小由“输入元素总数 / 其余已知维度乘积”推断，且必须整除。
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Reshape 节点 - 改变父节点值的形状
///
/// # 特性
/// - Forward: 将输入张量 reshape 为目标形状
/// - Backward (Gradient): 将上游梯度 reshape 回父节点形状
///
/// # 约束
/// - 目标形状的元素总数必须与输入相同（在构造期校验，不合法直接报错）
#[derive(Clone)]
pub(crate) struct Reshape {
    id: Option<NodeId>,
    name: Option<String>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    /// 推断后的目标形状
    target_shape: Vec<usize>,
    /// 父节点的原始形状（用于反向传播）
    parent_shape: Vec<usize>,
}

impl Reshape {
    pub(crate) fn new(parents: &[&NodeHandle], target_shape: &[i64]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "Reshape 节点只需要 1 个父节点".to_string(),
            ));
        }

        // 2. 获取父节点形状
        let parent_shape = parents[0].value_expected_shape().to_vec();
        let parent_size: usize = parent_shape.iter().product();

        // 3. 推断并验证目标形状
        let target_shape = Self::resolve_target_shape(target_shape, &parent_shape, parent_size)?;

        Ok(Self {
            id: None,
            name: None,
            value: None,
            grad: None,
            target_shape,
            parent_shape,
        })
    }

    /// 将含`-1`的目标形状解析为具体形状
    fn resolve_target_shape(
        target_shape: &[i64],
        parent_shape: &[usize],
        parent_size: usize,
    ) -> Result<Vec<usize>, GraphError> {
        if target_shape.is_empty() {
            return Err(GraphError::InvalidOperation(
                "Reshape 目标形状不能为空".to_string(),
            ));
        }

        let inferred_count = target_shape.iter().filter(|&&d| d == -1).count();
        if inferred_count > 1 {
            return Err(GraphError::InvalidOperation(format!(
                "Reshape 目标形状 {target_shape:?} 中最多只能有一个 -1"
            )));
        }
        if target_shape.iter().any(|&d| d == 0 || d < -1) {
            return Err(GraphError::InvalidOperation(format!(
                "Reshape 目标形状 {target_shape:?} 中的维度必须为正数或 -1"
            )));
        }

        let known_size: usize = target_shape
            .iter()
            .filter(|&&d| d != -1)
            .map(|&d| d as usize)
            .product();

        if inferred_count == 1 {
            // 由元素总数推断 -1 维度，必须整除
            if known_size == 0 || parent_size % known_size != 0 {
                return Err(GraphError::InvalidOperation(format!(
                    "Reshape 无法从输入形状 {parent_shape:?}（{parent_size}个元素）推断目标形状 \
                     {target_shape:?} 中的 -1 维度：{parent_size}不能被{known_size}整除"
                )));
            }
            let inferred_dim = parent_size / known_size;
            Ok(target_shape
                .iter()
                .map(|&d| if d == -1 { inferred_dim } else { d as usize })
                .collect())
        } else {
            let resolved: Vec<usize> = target_shape.iter().map(|&d| d as usize).collect();
            if known_size != parent_size {
                return Err(GraphError::ShapeMismatch {
                    expected: parent_shape.to_vec(),
                    got: resolved,
                    message: format!(
                        "Reshape 目标形状 {:?}（{}个元素）与输入形状 {:?}（{}个元素）的元素总数不匹配",
                        target_shape, known_size, parent_shape, parent_size
                    ),
                });
            }
            Ok(resolved)
        }
    }
}

impl TraitNode for Reshape {
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
                "Reshape节点'{}'的父节点'{}'没有值",
                self.name(),
                parents[0].name()
            ))
        })?;

        self.value = Some(parent_value.reshape(&self.target_shape));
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
        // Reshape 的梯度就是将上游梯度 reshape 回父节点的形状
        Ok(upstream_grad.reshape(&self.parent_shape))
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
