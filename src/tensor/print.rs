use crate::tensor::Tensor;
use std::fmt;

impl Tensor {
    /// 打印张量（等价于`println!("{tensor}")`）
    pub fn print(&self) {
        println!("{self}");
    }
}

// 只展示阶数不超过2的张量的具体数据；
// 更高阶的张量（标量除外，如形状[1,1,1]）只提示形状。
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape().to_vec();
        if shape.len() > 2 && !self.is_scalar() {
            return writeln!(
                f,
                "<对于阶数大于二（rank>2）的张量（形状：{shape:?}）无法展示具体数据>"
            );
        }

        let elements = self.to_vec();
        match shape.as_slice() {
            [_] => write_row(f, &elements)?,
            [_, cols] => {
                write!(f, "[")?;
                // 列数为0时没有任何元素可分行，`max(1)`防止`chunks(0)`panic
                for (i, row) in elements.chunks((*cols).max(1)).enumerate() {
                    if i > 0 {
                        write!(f, ",\n ")?;
                    }
                    write_row(f, row)?;
                }
                write!(f, "]")?;
            }
            // 标量：形状为[]，或[1,1,1]这类只有1个元素的情况
            _ => write!(f, "{:8.4}", elements[0])?,
        }
        writeln!(f, "\n形状: {shape:?}")
    }
}

fn write_row(f: &mut fmt::Formatter, row: &[f32]) -> fmt::Result {
    write!(f, "[")?;
    for (i, x) in row.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{x:8.4}")?;
    }
    write!(f, "]")
}
