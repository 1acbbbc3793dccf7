//! # 사례(Case) 저장소 함수
//!
//! 모든 함수는 파일 전체를 읽고(`get_all`), 메모리에서 바꾼 뒤,
//! 변경이 있을 때만 전체를 다시 씁니다(`replace_all`).

use super::RecordStore;
use crate::error::AppError;
use crate::models::Case;
use crate::services::sort_newest_first;

/// 전체 사례를 최신순으로 반환합니다.
pub async fn list_cases<S: RecordStore<Case>>(store: &S) -> Result<Vec<Case>, AppError> {
    let mut cases = store.get_all().await?;
    sort_newest_first(&mut cases, |c| c.created_at.as_str());
    Ok(cases)
}

/// ID로 사례 하나를 찾습니다.
pub async fn get_case<S: RecordStore<Case>>(store: &S, id: &str) -> Result<Option<Case>, AppError> {
    let cases = store.get_all().await?;
    Ok(cases.into_iter().find(|c| c.id == id))
}

/// 사례를 배열 끝에 추가하고 저장합니다.
///
/// ID 중복은 확인하지 않습니다.
pub async fn insert_case<S: RecordStore<Case>>(store: &S, case: Case) -> Result<Case, AppError> {
    let mut cases = store.get_all().await?;
    cases.push(case.clone());
    store.replace_all(&cases).await?;
    Ok(case)
}

/// 해당 ID의 사례를 모두 지웁니다.
///
/// ## 반환값
/// - `true`: 하나 이상 삭제
/// - `false`: 일치하는 사례 없음 (파일은 다시 쓰지 않음)
pub async fn delete_case<S: RecordStore<Case>>(store: &S, id: &str) -> Result<bool, AppError> {
    let mut cases = store.get_all().await?;
    let before = cases.len();
    cases.retain(|c| c.id != id);
    if cases.len() == before {
        return Ok(false);
    }
    store.replace_all(&cases).await?;
    Ok(true)
}

/// 조회수를 1 올리고 갱신된 사례를 반환합니다. 없으면 `None`.
///
/// 같은 ID의 사례가 여럿이면 모두 올리고, 그중 마지막 것을 반환합니다.
pub async fn increment_case_views<S: RecordStore<Case>>(
    store: &S,
    id: &str,
) -> Result<Option<Case>, AppError> {
    let mut cases = store.get_all().await?;
    let mut updated = None;
    for case in cases.iter_mut().filter(|c| c.id == id) {
        case.views = case.views.saturating_add(1);
        updated = Some(case.clone());
    }
    if updated.is_none() {
        return Ok(None);
    }

    store.replace_all(&cases).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFile;
    use serde_json::Map;
    use tempfile::TempDir;

    fn sample(id: &str, created_at: &str) -> Case {
        Case {
            id: id.to_string(),
            category_value: None,
            category_label: None,
            title: format!("{id} 제목"),
            body: "본문".to_string(),
            author: "관리자".to_string(),
            views: 0,
            created_at: created_at.to_string(),
            is_default: false,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("cases.json"), "cases");

        insert_case(&store, sample("old", "2024-01-01T00:00:00.000Z")).await.unwrap();
        insert_case(&store, sample("new", "2026-01-01T00:00:00.000Z")).await.unwrap();
        insert_case(&store, sample("mid", "2025-01-01T00:00:00.000Z")).await.unwrap();

        let ids: Vec<String> = list_cases(&store).await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn views_increase_by_one_per_call() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("cases.json"), "cases");
        insert_case(&store, sample("case-1", "2026-01-01T00:00:00.000Z")).await.unwrap();

        for expected in 1..=3 {
            let updated = increment_case_views(&store, "case-1").await.unwrap().unwrap();
            assert_eq!(updated.views, expected);
        }
        assert_eq!(get_case(&store, "case-1").await.unwrap().unwrap().views, 3);
        assert!(increment_case_views(&store, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_matched() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("cases.json"), "cases");
        insert_case(&store, sample("case-1", "2026-01-01T00:00:00.000Z")).await.unwrap();

        assert!(!delete_case(&store, "case-2").await.unwrap());
        assert_eq!(list_cases(&store).await.unwrap().len(), 1);

        assert!(delete_case(&store, "case-1").await.unwrap());
        assert!(list_cases(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn views_increase_on_every_duplicate_id() {
        let dir = TempDir::new().unwrap();
        let store = JsonFile::new(dir.path().join("cases.json"), "cases");
        let mut second = sample("dup", "2025-01-01T00:00:00.000Z");
        second.views = 10;
        insert_case(&store, sample("dup", "2026-01-01T00:00:00.000Z")).await.unwrap();
        insert_case(&store, second).await.unwrap();
        insert_case(&store, sample("other", "2024-01-01T00:00:00.000Z")).await.unwrap();

        let updated = increment_case_views(&store, "dup").await.unwrap().unwrap();
        assert_eq!(updated.views, 11);

        let views: Vec<(String, u64)> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.id, c.views))
            .collect();
        assert_eq!(
            views,
            [("dup".to_string(), 1), ("dup".to_string(), 11), ("other".to_string(), 0)]
        );
    }
}
