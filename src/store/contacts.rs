//! # 문의 글(ContactEntry) 저장소 함수
//!
//! 답변 추가와 삭제는 비밀번호 확인을 `authorize` 클로저로 받습니다.
//! 파일을 한 번만 읽은 상태에서 "찾기 → 확인 → 변경 → 저장" 을 끝내기 위해서입니다.

use super::RecordStore;
use crate::error::AppError;
use crate::models::{ContactEntry, Reply};
use crate::services::sort_newest_first;

/// 전체 문의 글을 최신순으로 반환합니다.
pub async fn list_contact_entries<S: RecordStore<ContactEntry>>(
    store: &S,
) -> Result<Vec<ContactEntry>, AppError> {
    let mut entries = store.get_all().await?;
    sort_newest_first(&mut entries, |e| e.created_at.as_str());
    Ok(entries)
}

pub async fn get_contact_entry<S: RecordStore<ContactEntry>>(
    store: &S,
    id: &str,
) -> Result<Option<ContactEntry>, AppError> {
    let entries = store.get_all().await?;
    Ok(entries.into_iter().find(|e| e.id == id))
}

pub async fn insert_contact_entry<S: RecordStore<ContactEntry>>(
    store: &S,
    entry: ContactEntry,
) -> Result<ContactEntry, AppError> {
    let mut entries = store.get_all().await?;
    entries.push(entry.clone());
    store.replace_all(&entries).await?;
    Ok(entry)
}

/// 문의 글에 답변을 덧붙입니다.
///
/// ## 반환값
/// - `Ok(Some(entry))`: 추가 후의 문의 글
/// - `Ok(None)`: 해당 ID 없음
/// - `Err(_)`: `authorize` 가 거부했거나 저장 실패 (이때 파일은 그대로)
pub async fn append_reply<S, F>(
    store: &S,
    id: &str,
    reply: Reply,
    authorize: F,
) -> Result<Option<ContactEntry>, AppError>
where
    S: RecordStore<ContactEntry>,
    F: FnOnce(&ContactEntry) -> Result<(), AppError>,
{
    let mut entries = store.get_all().await?;
    let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
        return Ok(None);
    };
    authorize(&*entry)?;

    entry.replies.push(reply);
    let updated = entry.clone();

    store.replace_all(&entries).await?;
    Ok(Some(updated))
}

/// 첫 번째로 일치하는 문의 글 하나를 지웁니다.
///
/// `Ok(false)` 는 해당 ID가 없다는 뜻입니다.
pub async fn delete_contact_entry<S, F>(store: &S, id: &str, authorize: F) -> Result<bool, AppError>
where
    S: RecordStore<ContactEntry>,
    F: FnOnce(&ContactEntry) -> Result<(), AppError>,
{
    let mut entries = store.get_all().await?;
    let Some(index) = entries.iter().position(|e| e.id == id) else {
        return Ok(false);
    };
    authorize(&entries[index])?;

    entries.remove(index);
    store.replace_all(&entries).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFile;
    use serde_json::Map;
    use tempfile::TempDir;

    fn entry(id: &str) -> ContactEntry {
        ContactEntry {
            id: id.to_string(),
            category_value: None,
            category_label: None,
            title: "문의".to_string(),
            body: "내용".to_string(),
            author_name: "익명".to_string(),
            password_hash: "hash".to_string(),
            password_hint: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            replies: Vec::new(),
            extra: Map::new(),
        }
    }

    fn reply(id: &str) -> Reply {
        Reply {
            id: id.to_string(),
            author: "관리자".to_string(),
            body: format!("{id} 답변"),
            created_at: "2026-01-02T00:00:00.000Z".to_string(),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn replies_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("contact.json"), "contact");
        insert_contact_entry(&store, entry("contact-1")).await.unwrap();

        append_reply(&store, "contact-1", reply("reply-1"), |_| Ok(())).await.unwrap();
        let updated = append_reply(&store, "contact-1", reply("reply-2"), |_| Ok(()))
            .await
            .unwrap()
            .unwrap();

        let ids: Vec<&str> = updated.replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["reply-1", "reply-2"]);
    }

    #[tokio::test]
    async fn rejected_authorization_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("contact.json"), "contact");
        insert_contact_entry(&store, entry("contact-1")).await.unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let denied = |_: &ContactEntry| Err(AppError::Unauthorized("no".into()));
        assert!(append_reply(&store, "contact-1", reply("reply-1"), denied).await.is_err());
        assert!(delete_contact_entry(&store, "contact-1", denied).await.is_err());

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn missing_ids_are_reported_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("contact.json"), "contact");

        assert!(get_contact_entry(&store, "nope").await.unwrap().is_none());
        assert!(append_reply(&store, "nope", reply("r"), |_| Ok(())).await.unwrap().is_none());
        assert!(!delete_contact_entry(&store, "nope", |_| Ok(())).await.unwrap());
    }
}
