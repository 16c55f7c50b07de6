//! Reader 模块测试
//!
//! 文本解析、名字替换与解析器缓存
