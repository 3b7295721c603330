use crate::tensor::Tensor;
use std::cmp::PartialEq;

// 两个张量相等当且仅当形状严格一致且所有元素相等
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_shape(other) && self.data == other.data
    }
}

impl PartialEq<f32> for Tensor {
    fn eq(&self, other: &f32) -> bool {
        self.number().is_some_and(|n| n == *other)
    }
}

impl PartialEq<Tensor> for f32 {
    fn eq(&self, other: &Tensor) -> bool {
        other.number().is_some_and(|n| n == *self)
    }
}
