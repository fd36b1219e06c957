//! 字节码操作码定义
//!
//! 表达式只涉及 f64，因此指令集很小；编码沿用分段规划：
//! - 0x00-0x1F：控制流与局部槽位
//! - 0x40-0x5F：F64 浮点运算
//! - 0x80-0x8F：函数调用

use std::fmt;

/// 字节码操作码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// 返回栈顶值
    ReturnValue = 0x02,

    /// 读取槽位并压栈
    /// 操作数：slot
    LoadLocal = 0x12,

    /// 从绑定中读取变量并写入槽位
    /// 操作数：slot, name
    BindLocal = 0x15,

    /// 浮点加法
    F64Add = 0x40,

    /// 浮点减法
    F64Sub = 0x41,

    /// 浮点乘法
    F64Mul = 0x42,

    /// 浮点除法（IEEE-754 语义，除零得到无穷或 NaN）
    F64Div = 0x43,

    /// 压入浮点常量
    /// 操作数：value (f64)
    F64Const = 0x49,

    /// 调用已注册的一元函数
    /// 操作数：function_index
    CallStatic = 0x80,

    /// 调用内置函数
    /// 操作数：intrinsic
    CallIntrinsic = 0x82,
}

impl Opcode {
    /// 获取操作码名称
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::ReturnValue => "ReturnValue",
            Opcode::LoadLocal => "LoadLocal",
            Opcode::BindLocal => "BindLocal",
            Opcode::F64Add => "F64Add",
            Opcode::F64Sub => "F64Sub",
            Opcode::F64Mul => "F64Mul",
            Opcode::F64Div => "F64Div",
            Opcode::F64Const => "F64Const",
            Opcode::CallStatic => "CallStatic",
            Opcode::CallIntrinsic => "CallIntrinsic",
        }
    }

    /// 对操作数栈的影响：(弹出个数, 压入个数)
    ///
    /// `CallIntrinsic` 按二元内置函数计算。
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Opcode::ReturnValue => (1, 0),
            Opcode::LoadLocal | Opcode::F64Const => (0, 1),
            Opcode::BindLocal => (0, 0),
            Opcode::F64Add | Opcode::F64Sub | Opcode::F64Mul | Opcode::F64Div => (2, 1),
            Opcode::CallStatic => (1, 1),
            Opcode::CallIntrinsic => (2, 1),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
