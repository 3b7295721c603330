use super::Tensor;
use std::ops::{Index, IndexMut};

// 按多维下标直接读写元素
impl Index<&[usize]> for Tensor {
    type Output = f32;

    fn index(&self, indices: &[usize]) -> &Self::Output {
        &self.data[indices]
    }
}

impl IndexMut<&[usize]> for Tensor {
    fn index_mut(&mut self, indices: &[usize]) -> &mut Self::Output {
        &mut self.data[indices]
    }
}

impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, indices: [usize; N]) -> &Self::Output {
        &self.data[&indices[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut Self::Output {
        &mut self.data[&indices[..]]
    }
}
