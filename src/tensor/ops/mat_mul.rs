use crate::errors::{ComparisonOperator, Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 矩阵乘法：`self`（m×k）与`other`（k×n）相乘，返回 m×n 的新张量。
    /// 两个操作数的阶数都须为2，且`self`的列数须等于`other`的行数，否则会panic。
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        assert!(
            self.dimension() == 2 && other.dimension() == 2,
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "张量的阶数".to_string(),
                operator: ComparisonOperator::Equal,
                threshold: 2,
            }
        );
        assert!(
            self.shape()[1] == other.shape()[0],
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );

        // ndarray的`dot`只定义在常量维度上，先从动态维度转换过去
        let lhs = self
            .data
            .view()
            .into_dimensionality::<ndarray::Ix2>()
            .unwrap();
        let rhs = other
            .data
            .view()
            .into_dimensionality::<ndarray::Ix2>()
            .unwrap();
        Tensor {
            data: lhs.dot(&rhs).into_dyn(),
        }
    }
}
