//! # Only Diff
//!
//! `only_diff`项目旨在用纯rust实现[SameDiff](https://deeplearning4j.konduit.ai/samediff/tutorials/quickstart)
//! 这类“先定义后执行”（define-then-run）的计算图框架：节点在构建期就推断好输出形状，
//! 值则在`eval`时才惰性计算，打造一个轻便的跨平台（windows，linux，android...）张量图框架。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
