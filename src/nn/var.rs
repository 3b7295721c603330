/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : Smart Var - 智能变量句柄，支持算子重载和链式调用
 *
 * 提供 SameDiff 的 SDVariable 级用户体验：形状在定义时即可查询，
 * 值通过 `eval()` 惰性计算。
 */

use super::graph::GraphInner;
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::ops::Add;
use std::rc::Rc;

/// 智能变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，实现算子重载
/// - 用户无需关心内部实现，像 SameDiff 的 `SDVariable` 一样使用
/// - Clone 语义（非 Copy），但开销极低（Rc clone）
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.ones_named(&[5, 8, 3, 4], "test")?;  // 返回 Var
/// let y = x.reshape(&[-1, 4])?.reshape(&[15, -1])?;  // 链式调用，形状即刻推断
/// let z = y.matmul(&y.transpose()?)?;
/// let value = z.eval()?;                             // 此时才真正计算
/// ```
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    ///
    /// 即使原始 Graph handle 已 drop，此方法仍返回有效的 Graph。
    /// 这是因为 Var 持有 `GraphInner` 的强引用（Rc）。
    pub fn get_graph(&self) -> super::graph::Graph {
        super::graph::Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 获取节点值的预期形状
    ///
    /// 这个形状在节点创建时就已确定，无需等到 `eval()`。
    pub fn shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self
            .graph
            .borrow()
            .get_node_value_expected_shape(self.id)?
            .to_vec())
    }

    // ==================== 形状/矩阵算子 ====================

    /// 创建 Reshape 节点。目标形状支持最多一个`-1`维度（由元素总数推断）。
    /// 元素总数不匹配的目标形状在这里（定义时）就会报错。
    pub fn reshape(&self, target_shape: &[i64]) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_reshape_node(self.id, target_shape, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 创建 Transpose 节点（要求本节点为矩阵）
    pub fn transpose(&self) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_transpose_node(self.id, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 创建 MatMul 节点：`self · other`
    pub fn matmul(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行矩阵乘法".to_string(),
            ));
        }
        let id = self
            .graph
            .borrow_mut()
            .new_mat_mul_node(self.id, other.id, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的加法（返回 Result）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行加法".to_string(),
            ));
        }
        let id = self
            .graph
            .borrow_mut()
            .new_add_node(&[self.id, other.id], None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 求值（ensure-forward 语义）：先确保前向传播完成，再返回本节点的值
    ///
    /// 这是 SameDiff 的 `SDVariable.eval()` 角色。
    pub fn eval(&self) -> Result<Tensor, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.get_node_value(self.id)?
            .cloned()
            .ok_or_else(|| {
                GraphError::ComputationError("前向传播后节点仍然没有值".to_string())
            })
    }

    /// 反向传播（ensure-forward 语义）
    ///
    /// # 语义：ensure-forward
    /// - 自动先执行 forward()，确保输出值已计算
    /// - 然后执行反向传播
    ///
    /// # 返回值
    /// 返回输出的标量值
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        // ensure-forward：先执行前向传播
        g.forward(self.id)?;
        // 然后执行反向传播
        g.backward(self.id)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的值（克隆的 Tensor）
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 设置节点的值
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 获取标量值（假设是标量 Tensor）
    pub fn item(&self) -> Result<f32, GraphError> {
        let val = self.value()?.ok_or(GraphError::NodeNotFound(self.id))?;
        val.number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    /// 获取节点的梯度
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }
}

// ==================== 算子重载 ====================

// Add for &Var
impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).expect("Var 加法失败")
    }
}

// Add for Var (consumes self)
impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

// Add<Var> for &Var
impl Add<Var> for &Var {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}

// Add<&Var> for Var
impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}
