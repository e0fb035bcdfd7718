//! 券码生成
//!
//! 生成器只负责产出候选券码，全局唯一性由存储层唯一约束保证

use rand::Rng;

/// 券码字符集
pub const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 券码长度
pub const CODE_LENGTH: usize = 10;

/// 券码生成器
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 基于线程本地随机数的券码生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
            .collect()
    }
}

/// 校验券码格式：固定长度，仅包含大写字母和数字
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_CHARSET.contains(&b))
}
