//! # JSON 배열 파일 저장소
//!
//! ## 동작 규칙
//! - 파일이 없으면 `[]` 로 새로 만듭니다 (상위 디렉토리 포함). 읽기/쓰기 직전마다 확인합니다.
//! - 읽기 실패나 파싱 실패(배열이 아닌 경우 포함)는 경고 로그 후 빈 목록을 돌려줍니다.
//!   파싱에 실패한 파일은 `<파일명>.corrupt-<epoch millis>` 로 옮겨 두어,
//!   다음 쓰기가 읽지 못한 데이터를 덮어쓰지 않게 합니다.
//! - 배열은 원소 단위로 읽습니다. 레코드로 읽히지 않는 원소 하나 때문에
//!   파일 전체를 버리지 않고, 그 원소는 다음 쓰기에서 그대로 보존됩니다.
//! - 쓰기는 2칸 들여쓰기 JSON 을 임시 파일에 쓴 뒤 rename 으로 교체합니다.
//!   읽는 쪽은 항상 이전 배열이나 새 배열 중 하나를 온전히 봅니다.

use std::ffi::OsString;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use super::RecordStore;
use crate::error::AppError;

const EMPTY_ARRAY: &str = "[]";

/// 같은 프로세스 안에서 동시에 저장해도 임시 파일 이름이 겹치지 않게 하는 일련번호
static TMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// 레코드 타입 `T` 의 JSON 배열 하나를 담은 데이터 파일
pub struct JsonFile<T> {
    path: PathBuf,
    /// 로그에 찍을 리소스 이름 (`cases`, `contact`)
    label: &'static str,
    _records: PhantomData<fn() -> T>,
}

// derive 를 쓰면 `T: Clone` / `T: Debug` 가 요구되므로 직접 구현합니다.
impl<T> Clone for JsonFile<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone(), self.label)
    }
}

impl<T> fmt::Debug for JsonFile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFile")
            .field("path", &self.path)
            .field("label", &self.label)
            .finish()
    }
}

impl<T> JsonFile<T> {
    pub fn new(path: impl Into<PathBuf>, label: &'static str) -> Self {
        Self {
            path: path.into(),
            label,
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일의 레코드를 읽습니다. 파일을 읽을 수 없으면 빈 목록.
    ///
    /// `T` 로 읽히지 않는 원소(`null`, 바꿀 수 없는 타입의 필드 등)는 목록에서 빠지지만
    /// 파일에는 남아 있고, `save` 때 원본 그대로 다시 기록됩니다.
    pub async fn load(&self) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let Some(items) = self.read_items().await? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::deserialize(item) {
                Ok(record) => records.push(record),
                Err(e) => warn!(store = self.label, index, error = %e, "skipping unreadable record"),
            }
        }
        Ok(records)
    }

    /// 레코드 목록 전체로 파일을 교체합니다.
    ///
    /// 현재 파일에서 `T` 로 읽히지 않는 원소는 목록 뒤에 그대로 붙여 씁니다.
    pub async fn save(&self, records: &[T]) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned,
    {
        let carried = self.unreadable_items().await?;
        if !carried.is_empty() {
            debug!(store = self.label, count = carried.len(), "carrying over unreadable records");
        }

        let rows: Vec<Row<'_, T>> = records
            .iter()
            .map(Row::Record)
            .chain(carried.iter().map(Row::Raw))
            .collect();
        let json = serde_json::to_string_pretty(&rows)?;

        let seq = TMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let tmp = self.sibling(&format!(".tmp-{}-{}", std::process::id(), seq));

        fs::write(&tmp, json).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// 파일의 배열 원소를 그대로 읽습니다.
    ///
    /// 읽기 실패는 `None`. JSON 이 아니거나 최상위가 배열이 아니면 파일을 격리한 뒤 `None`.
    async fn read_items(&self) -> Result<Option<Vec<Value>>, AppError> {
        self.ensure_exists().await?;

        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(store = self.label, error = %e, "read failed, returning empty list");
                return Ok(None);
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => Ok(Some(items)),
            Ok(_) => {
                self.quarantine("top-level value is not an array").await;
                Ok(None)
            }
            Err(e) => {
                self.quarantine(e).await;
                Ok(None)
            }
        }
    }

    async fn unreadable_items(&self) -> Result<Vec<Value>, AppError>
    where
        T: DeserializeOwned,
    {
        let items = self.read_items().await?.unwrap_or_default();
        Ok(items
            .into_iter()
            .filter(|item| T::deserialize(item).is_err())
            .collect())
    }

    async fn ensure_exists(&self) -> Result<(), AppError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, EMPTY_ARRAY).await?;
        debug!(store = self.label, path = %self.path.display(), "created empty data file");
        Ok(())
    }

    async fn quarantine(&self, cause: impl fmt::Display) {
        let backup = self.sibling(&format!(".corrupt-{}", Utc::now().timestamp_millis()));
        match fs::rename(&self.path, &backup).await {
            Ok(()) => warn!(
                store = self.label,
                error = %cause,
                backup = %backup.display(),
                "unreadable data file moved aside, returning empty list"
            ),
            Err(e) => warn!(
                store = self.label,
                error = %cause,
                rename_error = %e,
                "unreadable data file could not be moved aside, returning empty list"
            ),
        }
    }

    /// 같은 디렉토리에 `<파일명><suffix>` 경로를 만듭니다.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(self.label));
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

/// 저장할 배열의 원소 하나. 읽은 레코드이거나, 읽지 못해 원본 그대로 보관하는 값.
#[derive(Serialize)]
#[serde(untagged)]
enum Row<'a, T> {
    Record(&'a T),
    Raw(&'a Value),
}

impl<T> RecordStore<T> for JsonFile<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn get_all(&self) -> Result<Vec<T>, AppError> {
        self.load().await
    }

    async fn replace_all(&self, records: &[T]) -> Result<(), AppError> {
        self.save(records).await
    }
}
