/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : GraphInner 节点构建方法（new_*_node）。
 *                 所有形状校验都发生在这里（节点构造期），不合法的操作
 *                 在定义时就报错，而不是等到 eval。
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::NodeHandle;
use crate::nn::NodeId;

impl GraphInner {
    /// 添加节点到列表
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_id = self.generate_valid_node_id();
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;

        for &parent_id in parents {
            self.forward_edges
                .entry(parent_id)
                .or_default()
                .push(node_id);
        }
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    /// 创建 Variable 节点（叶子节点，形状在此声明）
    pub fn new_variable_node(
        &mut self,
        shape: &[usize],
        init: bool,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_variable(shape, init)?;
        self.add_node_to_list(node, name, "variable", &[])
    }

    pub fn new_add_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_add(&self.get_nodes(parents)?)?;
        self.add_node_to_list(handle, name, "add", parents)
    }

    pub fn new_mat_mul_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_mat_mul(&self.get_nodes(&[left_node_id, right_node_id])?)?;
        self.add_node_to_list(handle, name, "mat_mul", &[left_node_id, right_node_id])
    }

    /// 创建 Reshape 节点。`target_shape`支持最多一个`-1`维度（由元素总数推断）。
    pub fn new_reshape_node(
        &mut self,
        parent_id: NodeId,
        target_shape: &[i64],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_reshape(&self.get_nodes(&[parent_id])?, target_shape)?;
        self.add_node_to_list(handle, name, "reshape", &[parent_id])
    }

    pub fn new_transpose_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let handle = NodeHandle::new_transpose(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(handle, name, "transpose", &[parent_id])
    }
}
