//! 代码生成
//!
//! 第二遍遍历：按后序把表达式树翻译为栈机指令。
//!
//! 生成的程序布局：
//! - 序言：每个变量一条 `BindLocal`，从绑定中取值写入槽位
//! - 主体：后序遍历的求值指令
//! - 尾声：`ReturnValue`

use super::analysis::Analysis;
use super::registry::{ConstantTable, FunctionTable, NativeFunction};
use crate::frontend::parser::ast::{BinOp, Expr, Visitor};
use crate::vm::instructions::{Instruction, Intrinsic};
use indexmap::IndexSet;
use tracing::debug;

/// 代码生成的产物，交给加载器校验后即可执行
#[derive(Debug, Clone)]
pub struct Program {
    /// 表达式名称
    pub name: String,
    /// 槽位表：第 i 项是槽位 i 对应的变量名
    pub slots: Vec<String>,
    /// 被引用函数的快照，`CallStatic` 的操作数是其下标
    pub functions: Vec<NativeFunction>,
    /// 指令序列
    pub instructions: Vec<Instruction>,
    /// 操作数栈最大深度
    pub max_stack: usize,
}

impl Program {
    /// 槽位数量
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// 代码生成器
struct CodeGenerator<'a> {
    constants: &'a ConstantTable,
    slots: &'a IndexSet<String>,
    functions: &'a IndexSet<String>,
    instructions: Vec<Instruction>,
}

impl CodeGenerator<'_> {
    fn emit(
        &mut self,
        instruction: Instruction,
    ) {
        self.instructions.push(instruction);
    }
}

impl Visitor for CodeGenerator<'_> {
    fn visit_number(
        &mut self,
        value: f64,
    ) {
        self.emit(Instruction::F64Const(value));
    }

    fn visit_variable(
        &mut self,
        name: &str,
    ) {
        // 常量在编译期折叠，不占槽位
        if let Some(value) = self.constants.get(name) {
            self.emit(Instruction::F64Const(value));
        } else if let Some(slot) = self.slots.get_index_of(name) {
            self.emit(Instruction::LoadLocal(slot));
        }
    }

    fn leave_function(
        &mut self,
        name: &str,
    ) {
        if let Some(index) = self.functions.get_index_of(name) {
            self.emit(Instruction::CallStatic(index));
        }
    }

    fn leave_binary(
        &mut self,
        op: BinOp,
    ) {
        let instruction = match op {
            BinOp::Add => Instruction::F64Add,
            BinOp::Sub => Instruction::F64Sub,
            BinOp::Mul => Instruction::F64Mul,
            BinOp::Div => Instruction::F64Div,
            BinOp::Pow => Instruction::CallIntrinsic(Intrinsic::Pow),
        };
        self.emit(instruction);
    }
}

/// 生成程序
///
/// `analysis` 必须来自同一棵树和同一组注册表；遗漏的名称不会生成指令，
/// 由加载器的栈校验报告。
pub fn generate(
    name: &str,
    expr: &Expr,
    analysis: &Analysis,
    constants: &ConstantTable,
    functions: &FunctionTable,
) -> Program {
    let mut generator = CodeGenerator {
        constants,
        slots: &analysis.variables,
        functions: &analysis.functions,
        instructions: Vec::with_capacity(analysis.variables.len() + expr.node_count() + 1),
    };

    // 序言
    for (slot, variable) in analysis.variables.iter().enumerate() {
        generator.emit(Instruction::BindLocal {
            slot,
            name: variable.clone(),
        });
    }

    // 主体
    expr.accept(&mut generator);

    // 尾声
    generator.emit(Instruction::ReturnValue);

    let instructions = generator.instructions;
    debug!(expression = name, instructions = instructions.len(), "code generation complete");

    Program {
        name: name.to_string(),
        slots: analysis.variables.iter().cloned().collect(),
        functions: analysis
            .functions
            .iter()
            .filter_map(|name| functions.get(name).cloned())
            .collect(),
        instructions,
        max_stack: analysis.max_stack_depth,
    }
}
