//! 测验存储 - 业务能力层
//!
//! 每条测验记录保存为存储目录下的一个 TOML 文件（`quiz_<id>.toml`）。
//! 只负责读写记录，不关心测验如何生成。

use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{ArticleContent, Quiz, QuizSummary, StoredQuiz};

/// 记录中保留的正文字符数
pub const STORED_CONTENT_CHARS: usize = 1000;

const FILE_PREFIX: &str = "quiz_";
const FILE_EXTENSION: &str = "toml";

/// 基于 TOML 文件的测验存储
pub struct QuizStore {
    folder: PathBuf,
}

impl QuizStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// 保存一次生成结果，返回带 id 和时间戳的记录
    pub async fn save(
        &self,
        url: &str,
        article: &ArticleContent,
        quiz: &Quiz,
    ) -> Result<StoredQuiz, StoreError> {
        fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| StoreError::io(self.folder.display().to_string(), e))?;

        let mut record = StoredQuiz {
            id: self.next_id().await?,
            url: url.to_string(),
            title: article.title.clone(),
            date_generated: Local::now(),
            scraped_content: article.content.chars().take(STORED_CONTENT_CHARS).collect(),
            full_quiz_data: quiz.to_json()?,
        };

        // 先完整写入临时文件，再用 hard_link 发布：目标已存在时失败而不是覆盖，冲突时顺延 id。
        // 任何一步失败都删除临时文件，不留下半截记录。
        loop {
            let path = self.path_for(record.id);
            let tmp_path = temp_path_for(&path);
            let text = toml::to_string_pretty(&record)?;

            if let Err(e) = write_file(&tmp_path, &text).await {
                discard(&tmp_path).await;
                return Err(StoreError::io(tmp_path.display().to_string(), e));
            }

            let published = fs::hard_link(&tmp_path, &path).await;
            discard(&tmp_path).await;

            match published {
                Ok(()) => {
                    info!("💾 测验已保存: #{} {}", record.id, record.title);
                    return Ok(record);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!("id {} 已被占用，顺延", record.id);
                    record.id += 1;
                }
                Err(e) => return Err(StoreError::io(path.display().to_string(), e)),
            }
        }
    }

    /// 历史记录（最新的在前）
    pub async fn list(&self) -> Result<Vec<QuizSummary>, StoreError> {
        let mut records = self.load_all().await?;
        records.sort_by(|a, b| {
            b.date_generated
                .cmp(&a.date_generated)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(records.iter().map(StoredQuiz::summary).collect())
    }

    /// 按 id 读取记录
    pub async fn get(&self, id: u64) -> Result<StoredQuiz, StoreError> {
        let path = self.path_for(id);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound { id });
        }

        load_record(&path).await
    }

    /// 按 id 读取并反序列化完整测验
    pub async fn load_quiz(&self, id: u64) -> Result<Quiz, StoreError> {
        Ok(self.get(id).await?.quiz()?)
    }

    /// 删除记录
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let path = self.path_for(id);

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("🗑️ 测验已删除: #{}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound { id }),
            Err(e) => Err(StoreError::io(path.display().to_string(), e)),
        }
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.folder
            .join(format!("{}{}.{}", FILE_PREFIX, id, FILE_EXTENSION))
    }

    async fn next_id(&self) -> Result<u64, StoreError> {
        let max_id = self
            .record_paths()
            .await?
            .iter()
            .filter_map(|path| id_from_path(path))
            .max()
            .unwrap_or(0);

        Ok(max_id + 1)
    }

    async fn record_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        if !fs::try_exists(&self.folder).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.folder)
            .await
            .map_err(|e| StoreError::io(self.folder.display().to_string(), e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(self.folder.display().to_string(), e))?
        {
            let path = entry.path();
            if id_from_path(&path).is_some() {
                paths.push(path);
            }
        }

        Ok(paths)
    }

    async fn load_all(&self) -> Result<Vec<StoredQuiz>, StoreError> {
        let mut records = Vec::new();

        for path in self.record_paths().await? {
            match load_record(&path).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("跳过无法读取的记录 {}: {}", path.display(), e),
            }
        }

        Ok(records)
    }
}

async fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("临时文件删除失败 {}: {}", path.display(), e);
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn load_record(path: &Path) -> Result<StoredQuiz, StoreError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io(path.display().to_string(), e))?;

    toml::from_str(&text).map_err(|source| StoreError::Deserialize {
        path: path.display().to_string(),
        source,
    })
}

fn id_from_path(path: &Path) -> Option<u64> {
    if path.extension().and_then(|s| s.to_str()) != Some(FILE_EXTENSION) {
        return None;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.strip_prefix(FILE_PREFIX))
        .and_then(|id| id.parse().ok())
}
