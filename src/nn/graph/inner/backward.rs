/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : GraphInner VJP 反向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashSet;

impl GraphInner {
    /// 反向传播。要求输出节点的值已计算且为标量（size == 1）。
    /// 返回输出节点的标量值。
    pub fn backward(&mut self, output_id: NodeId) -> Result<f32, GraphError> {
        let output_node = self.get_node(output_id)?;
        let output_value = output_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("{output_node}没有值，请先执行 forward"))
        })?;

        if output_value.size() != 1 {
            return Err(GraphError::InvalidOperation(format!(
                "反向传播要求输出为标量，但得到形状 {:?}",
                output_value.shape()
            )));
        }
        let output_scalar = output_value.number().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "无法从输出节点获取标量值，形状: {:?}",
                output_value.shape()
            ))
        })?;
        let output_shape = output_value.shape().to_vec();

        // 清掉上一轮的梯度再累积
        self.clear_grad()?;
        self.get_node_mut(output_id)?
            .set_grad(Some(&Tensor::ones(&output_shape)))?;

        // 逆拓扑序保证：处理某节点时，其所有（子图内的）子节点都已处理完，
        // 该节点的梯度已经累积完整
        let topo_order = self.topological_sort_backward(output_id)?;
        for node_id in topo_order {
            self.propagate_grad_to_parents(node_id)?;
        }

        Ok(output_scalar)
    }

    /// 沿父边做后序DFS再反转，得到“子节点先于父节点”的处理顺序
    fn topological_sort_backward(&self, start_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        self.visit_ancestors(start_id, &mut visited, &mut order)?;
        order.reverse();
        Ok(order)
    }

    fn visit_ancestors(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<(), GraphError> {
        if !visited.insert(node_id) {
            return Ok(());
        }
        for parent_id in self.get_node_parents(node_id)? {
            self.visit_ancestors(parent_id, visited, order)?;
        }
        order.push(node_id);
        Ok(())
    }

    /// 将节点已累积完整的梯度分发给它的每个父节点
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parents_ids = self.get_node_parents(node_id)?;
        if parents_ids.is_empty() {
            return Ok(());
        }

        let node = self.get_node(node_id)?;
        let Some(upstream_grad) = node.grad().cloned() else {
            // 没收到梯度的节点（不在任何通往输出的路径上）直接跳过
            return Ok(());
        };

        // 先算出每个父节点的梯度贡献，再统一累积（避免同时可变借用）
        let mut contributions: Vec<(NodeId, Tensor)> = Vec::with_capacity(parents_ids.len());
        for &parent_id in &parents_ids {
            let parent = self.get_node(parent_id)?;
            // 二元算子（如 MatMul）需要另一个父节点的值作辅助
            let assistant = parents_ids
                .iter()
                .find(|&&id| id != parent_id)
                .map(|&id| self.get_node(id))
                .transpose()?;
            let grad = node.calc_grad_to_parent(parent, &upstream_grad, assistant)?;
            contributions.push((parent_id, grad));
        }

        for (parent_id, grad) in contributions {
            let parent = self.get_node_mut(parent_id)?;
            let accumulated = match parent.grad() {
                Some(existing) => existing + &grad,
                None => grad,
            };
            parent.set_grad(Some(&accumulated))?;
        }
        Ok(())
    }
}
