//! 指令定义
//!
//! 每条指令对应一个 [`Opcode`]，操作数直接内联在枚举变体中。

use super::opcode::Opcode;
use std::fmt;

/// 内置函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    /// 幂运算 `base ^ exponent`
    Pow,
}

impl Intrinsic {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::Pow => "pow",
        }
    }

    /// 参数个数
    pub fn arity(&self) -> usize {
        match self {
            Intrinsic::Pow => 2,
        }
    }

    /// 调用
    #[inline]
    pub fn apply(
        &self,
        left: f64,
        right: f64,
    ) -> f64 {
        match self {
            Intrinsic::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 栈机指令
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// 从绑定中读取 `name` 写入槽位
    BindLocal { slot: usize, name: String },
    /// 压入常量
    F64Const(f64),
    /// 读取槽位并压栈
    LoadLocal(usize),
    F64Add,
    F64Sub,
    F64Mul,
    F64Div,
    /// 调用内置函数
    CallIntrinsic(Intrinsic),
    /// 调用函数表中的第 n 个函数
    CallStatic(usize),
    /// 返回栈顶值
    ReturnValue,
}

impl Instruction {
    /// 对应的操作码
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::BindLocal { .. } => Opcode::BindLocal,
            Instruction::F64Const(_) => Opcode::F64Const,
            Instruction::LoadLocal(_) => Opcode::LoadLocal,
            Instruction::F64Add => Opcode::F64Add,
            Instruction::F64Sub => Opcode::F64Sub,
            Instruction::F64Mul => Opcode::F64Mul,
            Instruction::F64Div => Opcode::F64Div,
            Instruction::CallIntrinsic(_) => Opcode::CallIntrinsic,
            Instruction::CallStatic(_) => Opcode::CallStatic,
            Instruction::ReturnValue => Opcode::ReturnValue,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let opcode = self.opcode();
        match self {
            Instruction::BindLocal { slot, name } => write!(f, "{} {} {}", opcode, slot, name),
            Instruction::F64Const(value) => write!(f, "{} {:?}", opcode, value),
            Instruction::LoadLocal(slot) => write!(f, "{} {}", opcode, slot),
            Instruction::CallIntrinsic(intrinsic) => write!(f, "{} {}", opcode, intrinsic),
            Instruction::CallStatic(index) => write!(f, "{} {}", opcode, index),
            _ => write!(f, "{}", opcode),
        }
    }
}
