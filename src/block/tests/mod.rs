//! Block 模块测试
//!
//! 代数规范化、能力系统、结构相等与文本表示
