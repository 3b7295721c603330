/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @Description  : 张量的形状操作：reshape、permute、transpose
 */

use super::Tensor;
use crate::errors::TensorError;
use std::collections::HashSet;

impl Tensor {
    /// 将张量变形为给定形状并返回新张量（不影响原张量）。
    /// 目标形状所有元素的乘积必须与当前张量的元素总数相等，否则会panic。
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.data.len();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        // NOTE: permute过的张量内存可能不连续，`into_shape`会失败，这里统一转成标准布局
        let data = self
            .data
            .as_standard_layout()
            .to_owned()
            .into_shape(shape)
            .unwrap();
        Self { data }
    }

    /// 交换张量的两个（以上）维度，并将其返回（不影响原张量）
    pub fn permute(&self, axes: &[usize]) -> Self {
        assert!(axes.len() >= 2, "{}", TensorError::PermuteNeedAtLeast2Dims);
        // 检查axes中的所有元素必须是唯一且在[0, <张量维数>)范围内
        let unique_axes = axes.iter().copied().collect::<HashSet<_>>();
        assert!(
            !(unique_axes.len() != axes.len()
                || !unique_axes.iter().all(|&a| a < self.dimension())),
            "{}",
            TensorError::PermuteNeedUniqueAndInRange
        );

        let permuted_data = self.data.clone().permuted_axes(axes);
        Self {
            data: permuted_data,
        }
    }

    /// 张量的转置：交换前两个维度。阶数小于2时为恒等操作。
    pub fn transpose(&self) -> Self {
        if self.dimension() <= 1 {
            self.clone()
        } else {
            let mut axes: Vec<usize> = (0..self.dimension()).collect();
            axes.swap(0, 1);
            self.permute(&axes)
        }
    }
}
