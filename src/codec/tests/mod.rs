//! Codec 模块测试
//!
//! 字节码编码、严格解码与内容寻址
