//! Virtual Machine executor
//!
//! 栈机解释器：每次 `compute` 使用独立的操作数栈与槽位，
//! 已加载的代码只读共享，可在多个线程上同时执行。

use super::bindings::Bindings;
use super::errors::{EvalError, VMError, VMResult};
use super::instructions::Instruction;
use super::loader::Code;
use crate::middle::NativeFunction;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// 内联存储的操作数栈容量，超出时才分配堆内存
const INLINE_STACK: usize = 16;

/// 内联存储的槽位数量
const INLINE_SLOTS: usize = 8;

/// VM 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VMConfig {
    /// 是否逐条跟踪指令执行
    pub trace_execution: bool,
}

/// 单次执行的状态
struct VM<'a> {
    /// 已加载的代码
    code: &'a Code,
    /// 操作数栈
    stack: SmallVec<[f64; INLINE_STACK]>,
    /// 局部槽位
    slots: SmallVec<[f64; INLINE_SLOTS]>,
}

impl<'a> VM<'a> {
    fn new(code: &'a Code) -> Self {
        let mut stack = SmallVec::new();
        stack.reserve_exact(code.max_stack);
        Self {
            code,
            stack,
            slots: SmallVec::from_elem(0.0, code.slots.len()),
        }
    }

    /// 压栈，超过校验时确定的容量即报错
    #[inline]
    fn push(
        &mut self,
        ip: usize,
        value: f64,
    ) -> VMResult<()> {
        if self.stack.len() >= self.code.max_stack {
            return Err(VMError::StackOverflow {
                ip,
                capacity: self.code.max_stack,
            });
        }
        self.stack.push(value);
        Ok(())
    }

    #[inline]
    fn pop(
        &mut self,
        ip: usize,
    ) -> VMResult<f64> {
        self.stack.pop().ok_or(VMError::StackUnderflow { ip })
    }

    /// 弹出两个操作数，返回 (左, 右)
    #[inline]
    fn pop_pair(
        &mut self,
        ip: usize,
    ) -> VMResult<(f64, f64)> {
        let right = self.pop(ip)?;
        let left = self.pop(ip)?;
        Ok((left, right))
    }

    fn slot(
        &self,
        ip: usize,
        slot: usize,
    ) -> VMResult<f64> {
        self.slots.get(slot).copied().ok_or(VMError::SlotOutOfRange {
            ip,
            slot,
            count: self.slots.len(),
        })
    }

    /// 执行全部指令，返回 `ReturnValue` 弹出的值
    fn run<B: Bindings + ?Sized>(
        &mut self,
        bindings: &B,
    ) -> Result<f64, EvalError> {
        let code = self.code;
        let trace = code.config.trace_execution;

        for (ip, instruction) in code.instructions.iter().enumerate() {
            if trace {
                trace!(ip, %instruction, stack = ?self.stack.as_slice(), "执行指令");
            }
            if let Some(value) = self.execute_instruction(ip, instruction, bindings)? {
                return Ok(value);
            }
        }
        Err(VMError::MissingReturn.into())
    }

    /// 执行单条指令；`ReturnValue` 时返回 Some
    fn execute_instruction<B: Bindings + ?Sized>(
        &mut self,
        ip: usize,
        instruction: &Instruction,
        bindings: &B,
    ) -> Result<Option<f64>, EvalError> {
        use Instruction::*;

        match instruction {
            // 序言：读取绑定
            BindLocal { slot, name } => {
                let value = bindings.lookup(name)?;
                let count = self.slots.len();
                let target = self
                    .slots
                    .get_mut(*slot)
                    .ok_or(VMError::SlotOutOfRange {
                        ip,
                        slot: *slot,
                        count,
                    })?;
                *target = value;
            }

            F64Const(value) => self.push(ip, *value)?,

            LoadLocal(slot) => {
                let value = self.slot(ip, *slot)?;
                self.push(ip, value)?;
            }

            F64Add => {
                let (a, b) = self.pop_pair(ip)?;
                self.push(ip, a + b)?;
            }

            F64Sub => {
                let (a, b) = self.pop_pair(ip)?;
                self.push(ip, a - b)?;
            }

            F64Mul => {
                let (a, b) = self.pop_pair(ip)?;
                self.push(ip, a * b)?;
            }

            F64Div => {
                let (a, b) = self.pop_pair(ip)?;
                self.push(ip, a / b)?;
            }

            CallIntrinsic(intrinsic) => {
                let (a, b) = self.pop_pair(ip)?;
                self.push(ip, intrinsic.apply(a, b))?;
            }

            CallStatic(index) => {
                let function = code_function(self.code, ip, *index)?;
                let operand = self.pop(ip)?;
                self.push(ip, function.call(operand))?;
            }

            ReturnValue => return Ok(Some(self.pop(ip)?)),
        }
        Ok(None)
    }
}

fn code_function(
    code: &Code,
    ip: usize,
    index: usize,
) -> VMResult<&NativeFunction> {
    code.functions.get(index).ok_or(VMError::FunctionOutOfRange {
        ip,
        index,
        count: code.functions.len(),
    })
}

/// 执行已加载的代码
pub(crate) fn execute<B: Bindings + ?Sized>(
    code: &Code,
    bindings: &B,
) -> Result<f64, EvalError> {
    if code.config.trace_execution {
        debug!(expression = %code.name, "开始执行");
    }
    let result = VM::new(code).run(bindings);
    if code.config.trace_execution {
        debug!(expression = %code.name, ?result, "执行完成");
    }
    result
}
