//! 多语言文案模块
//!
//! 启动时从 `{path}/{language}.yaml` 加载文案目录，运行时可通过 `set_language` 整体切换。
//!
//! YAML 中的嵌套结构在加载时一次性展开为点分键（如 `error.invalid_request`），
//! 查询只做一次字面键查找。读取端通过 `ArcSwap` 原子 load，切换语言不阻塞查询。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_yaml::Value;
use tracing::{info, warn};

use crate::error::{InfraError, Result};

/// 缺失键时返回的兜底文案
pub const MESSAGE_NOT_FOUND: &str = "Message not found";

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 单一语言的文案目录
#[derive(Debug, Default)]
struct Catalog {
    language: String,
    messages: HashMap<String, String>,
}

/// 文案查询服务
///
/// 进程内共享一个实例（通常放在 `Arc` 中由应用状态持有）
#[derive(Debug)]
pub struct Localizer {
    dir: PathBuf,
    current: ArcSwap<Catalog>,
}

impl Localizer {
    /// 从目录加载指定语言
    ///
    /// 语言为空时使用默认语言
    pub fn load(dir: impl AsRef<Path>, language: &str) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let language = if language.trim().is_empty() {
            DEFAULT_LANGUAGE
        } else {
            language.trim()
        };
        let catalog = read_catalog(&dir, language)?;

        info!(
            language = %catalog.language,
            messages = catalog.messages.len(),
            "Loaded messages for language"
        );

        Ok(Self {
            dir,
            current: ArcSwap::from_pointee(catalog),
        })
    }

    /// 直接使用内存中的文案构造（不关联目录，`set_language` 将始终失败）
    pub fn from_messages(language: &str, messages: HashMap<String, String>) -> Self {
        Self {
            dir: PathBuf::new(),
            current: ArcSwap::from_pointee(Catalog {
                language: language.to_string(),
                messages,
            }),
        }
    }

    /// 空文案目录，所有查询都返回兜底文案
    pub fn empty() -> Self {
        Self::from_messages(DEFAULT_LANGUAGE, HashMap::new())
    }

    /// 切换语言
    ///
    /// 加载失败时保留当前文案不变
    pub fn set_language(&self, language: &str) -> Result<()> {
        let catalog = read_catalog(&self.dir, language.trim())?;
        info!(
            language = %catalog.language,
            messages = catalog.messages.len(),
            "Switched message language"
        );
        self.current.store(Arc::new(catalog));
        Ok(())
    }

    /// 当前语言
    pub fn language(&self) -> String {
        self.current.load().language.clone()
    }

    /// 按点分键查询文案
    pub fn translate(&self, key: &str) -> String {
        let catalog = self.current.load();
        match catalog.messages.get(key) {
            Some(message) => message.clone(),
            None => {
                warn!(key = %key, language = %catalog.language, "Message key not found");
                MESSAGE_NOT_FOUND.to_string()
            }
        }
    }
}

/// 读取并展开单个语言文件
fn read_catalog(dir: &Path, language: &str) -> Result<Catalog> {
    // 语言名直接拼接为文件名，禁止路径字符
    if language.is_empty()
        || !language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(InfraError::CatalogFormat(format!(
            "invalid language: {:?}",
            language
        )));
    }

    let path = dir.join(format!("{}.yaml", language));
    let display = path.display().to_string();

    let content = std::fs::read_to_string(&path).map_err(|source| InfraError::CatalogRead {
        path: display.clone(),
        source,
    })?;

    let root: Value = serde_yaml::from_str(&content).map_err(|source| InfraError::CatalogParse {
        path: display.clone(),
        source,
    })?;

    if !root.is_mapping() {
        return Err(InfraError::CatalogFormat(format!(
            "{}: root must be a mapping",
            display
        )));
    }

    let mut messages = HashMap::new();
    flatten("", &root, &mut messages);

    Ok(Catalog {
        language: language.to_string(),
        messages,
    })
}

/// 将嵌套 YAML 展开为点分键
///
/// 只保留标量叶子节点，序列和 null 被忽略
fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(segment) = scalar_to_string(k) else {
                    continue;
                };
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{}.{}", prefix, segment)
                };
                flatten(&key, v, out);
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        other => {
            if prefix.is_empty() {
                return;
            }
            if let Some(text) = scalar_to_string(other) {
                out.insert(prefix.to_string(), text);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
