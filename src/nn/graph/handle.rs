/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Graph 句柄（用户级 API）
 */

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::var::Var;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄（SameDiff 风格用户 API）
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Var 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    /// 创建新图
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(GraphInner::new())),
        }
    }

    /// 创建带名称的图
    pub fn with_name(name: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GraphInner::with_name(name))),
        }
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// 从现有 Rc 创建句柄
    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, Rc::clone(&self.inner))
    }

    // ==================== 创建变量 ====================

    /// 创建带形状的（未初始化）Variable 节点
    pub fn variable(&self, shape: &[usize], name: Option<&str>) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_variable_node(shape, false, name)?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建输入节点并设置数据
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_variable_node(data.shape(), false, None)?;
        g.set_node_value(node_id, Some(data))?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建命名输入节点
    pub fn input_named(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_variable_node(data.shape(), false, Some(name))?;
        g.set_node_value(node_id, Some(data))?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建全零张量
    pub fn zeros(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::zeros(shape))
    }

    /// 创建命名全零张量
    pub fn zeros_named(&self, shape: &[usize], name: &str) -> Result<Var, GraphError> {
        self.input_named(&Tensor::zeros(shape), name)
    }

    /// 创建全一张量
    pub fn ones(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::ones(shape))
    }

    /// 创建命名全一张量（SameDiff 的 `SD.one(name, shape)`角色）
    pub fn ones_named(&self, shape: &[usize], name: &str) -> Result<Var, GraphError> {
        self.input_named(&Tensor::ones(shape), name)
    }

    /// 创建随机（标准正态）张量
    pub fn randn(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::normal(0.0, 1.0, shape))
    }

    /// 创建命名随机（标准正态）张量
    pub fn randn_named(&self, shape: &[usize], name: &str) -> Result<Var, GraphError> {
        self.input_named(&Tensor::normal(0.0, 1.0, shape), name)
    }

    // ==================== 算子 sugar ====================

    /// 矩阵乘法（SameDiff 的 `SD.mmul(a, b)`角色）
    pub fn mmul(&self, left: &Var, right: &Var) -> Result<Var, GraphError> {
        left.matmul(right)
    }

    /// 转置（SameDiff 的 `SD.transpose(a)`角色）
    pub fn transpose(&self, var: &Var) -> Result<Var, GraphError> {
        var.transpose()
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self, output: &Var) -> Result<(), GraphError> {
        self.inner.borrow_mut().forward(output.node_id())
    }

    /// 反向传播（ensure-forward 语义），返回输出的标量值
    pub fn backward(&self, output: &Var) -> Result<f32, GraphError> {
        output.backward()
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&self) -> Result<(), GraphError> {
        self.inner.borrow_mut().clear_grad()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
