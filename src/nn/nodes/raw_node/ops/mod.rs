/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 算子节点。形状在构造期校验与推断（先定义后执行），
 *                 值在前向传播时才计算。
 */

mod add;
mod mat_mul;
mod reshape;
mod transpose;

pub(crate) use add::Add;
pub(crate) use mat_mul::MatMul;
pub(crate) use reshape::Reshape;
pub(crate) use transpose::Transpose;
