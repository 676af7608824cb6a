//! MCP handler tests
mod common;

use common::{data_path, file_handler, ids, memory_handler};
use std::sync::Arc;
use todo_mcp::{Priority, TodoServerHandler};

// タスク追加とリスト表示
#[tokio::test]
async fn test_add_and_list() {
    let handler = memory_handler();

    let result = handler
        .handle_add_task(
            "buy milk".to_string(),
            Some("High".to_string()),
            Some("2024-01-01".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(
        result,
        "Task created with ID: 4 (priority: High, due: 2024-01-01)"
    );

    let list = handler.handle_list_tasks(None).await.unwrap();
    assert!(list.contains("3. [ ] #4 buy milk (priority: High, due: 2024-01-01)"));
    assert!(list.contains("4 of 4 remaining"));
}

// 空テキストの追加はエラーで、状態は変わらない
#[tokio::test]
async fn test_add_blank_text_rejected() {
    let handler = memory_handler();
    let mut changes = handler.subscribe();

    let result = handler.handle_add_task("   ".to_string(), None, None).await;
    assert!(result.is_err());
    assert_eq!(handler.snapshot().store.len(), 3);
    assert!(!changes.has_changed().unwrap());
}

// 不正な引数はストアに触れる前に拒否される
#[tokio::test]
async fn test_invalid_arguments_rejected() {
    let handler = memory_handler();

    assert!(
        handler
            .handle_add_task("x".to_string(), Some("urgent".to_string()), None)
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_add_task("x".to_string(), None, Some("tomorrow".to_string()))
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_list_tasks(Some("archived".to_string()))
            .await
            .is_err()
    );
    assert_eq!(handler.snapshot().store.len(), 3);
}

// 完了切り替えとフィルタ
#[tokio::test]
async fn test_toggle_and_filter() {
    let handler = memory_handler();

    let result = handler.handle_toggle_task(2).await.unwrap();
    assert_eq!(result, "Task #2 marked as done");

    let completed = handler
        .handle_list_tasks(Some("completed".to_string()))
        .await
        .unwrap();
    assert!(completed.contains("#2 Learn CSS"));
    assert!(!completed.contains("#1 "));

    let pending = handler
        .handle_list_tasks(Some("pending".to_string()))
        .await
        .unwrap();
    assert!(pending.contains("#1 Learn HTML"));
    assert!(!pending.contains("#2 "));

    let result = handler.handle_toggle_task(2).await.unwrap();
    assert_eq!(result, "Task #2 marked as pending");
}

// 存在しないIDは何もしない
#[tokio::test]
async fn test_unknown_id_is_noop() {
    let handler = memory_handler();
    let before = handler.snapshot();

    for result in [
        handler.handle_toggle_task(99).await,
        handler.handle_start_edit(99).await,
        handler.handle_cancel_edit(99).await,
        handler.handle_remove_task(99).await,
        handler
            .handle_commit_edit(99, "x".to_string(), None, None)
            .await,
    ] {
        assert_eq!(result.unwrap(), "Task #99 not found, nothing changed");
    }
    assert_eq!(handler.snapshot(), before);
}

// 編集の開始・確定
#[tokio::test]
async fn test_edit_flow() {
    let handler = memory_handler();
    let original_due = handler.snapshot().store.get(1).unwrap().due;

    handler.handle_start_edit(1).await.unwrap();
    assert!(handler.snapshot().store.get(1).unwrap().editing);
    let list = handler.handle_list_tasks(None).await.unwrap();
    assert!(list.contains("[editing]"));

    assert!(
        handler
            .handle_commit_edit(1, "".to_string(), None, None)
            .await
            .is_err()
    );
    assert!(handler.snapshot().store.get(1).unwrap().editing);

    let result = handler
        .handle_commit_edit(1, "Learn HTML5".to_string(), Some("low".to_string()), None)
        .await
        .unwrap();
    assert_eq!(result, "Task #1 updated successfully");

    let snapshot = handler.snapshot();
    let task = snapshot.store.get(1).unwrap();
    assert_eq!(task.text, "Learn HTML5");
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.due, original_due);
    assert!(!task.editing);
}

// 編集のキャンセル
#[tokio::test]
async fn test_cancel_edit() {
    let handler = memory_handler();
    handler.handle_start_edit(3).await.unwrap();
    handler.handle_cancel_edit(3).await.unwrap();

    let snapshot = handler.snapshot();
    let task = snapshot.store.get(3).unwrap();
    assert!(!task.editing);
    assert_eq!(task.text, "Learn JavaScript");
}

// 削除の繰り返しは無害
#[tokio::test]
async fn test_repeated_remove() {
    let handler = memory_handler();

    let result = handler.handle_remove_task(1).await.unwrap();
    assert_eq!(result, "Task #1 (Learn HTML) removed");
    let result = handler.handle_remove_task(1).await.unwrap();
    assert_eq!(result, "Task #1 not found, nothing changed");

    assert_eq!(ids(&handler.snapshot().store), vec![2, 3]);
}

// 同じタスクの同時削除は一度だけ成功し、変更も一度だけ通知される
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_remove_removes_once() {
    let handler = Arc::new(memory_handler());
    let mut changes = handler.subscribe();

    let calls: Vec<_> = (0..16)
        .map(|_| {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.handle_remove_task(2).await.unwrap() })
        })
        .collect();

    let mut removed = 0;
    for call in calls {
        let result = call.await.unwrap();
        if result == "Task #2 (Learn CSS) removed" {
            removed += 1;
        } else {
            assert_eq!(result, "Task #2 not found, nothing changed");
        }
    }
    assert_eq!(removed, 1);
    assert_eq!(ids(&handler.snapshot().store), vec![1, 3]);

    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();
    handler.handle_remove_task(2).await.unwrap();
    assert!(!changes.has_changed().unwrap());
}

// 編集の確定は省略された値を確定時点のタスクから取る
#[tokio::test]
async fn test_commit_edit_keeps_current_values() {
    let handler = memory_handler();
    handler
        .handle_commit_edit(1, "first".to_string(), Some("High".to_string()), None)
        .await
        .unwrap();
    handler
        .handle_commit_edit(1, "second".to_string(), None, Some("2030-05-01".to_string()))
        .await
        .unwrap();

    let snapshot = handler.snapshot();
    let task = snapshot.store.get(1).unwrap();
    assert_eq!(task.text, "second");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due.to_string(), "2030-05-01");
}

// 並べ替え
#[tokio::test]
async fn test_reorder() {
    let handler = memory_handler();

    let result = handler.handle_reorder_task(0, 2).await.unwrap();
    assert_eq!(result, "Task #1 moved from position 0 to 2");
    assert_eq!(ids(&handler.snapshot().store), vec![2, 3, 1]);

    let result = handler.handle_reorder_task(0, 7).await.unwrap();
    assert_eq!(
        result,
        "Position out of range (list has 3 task(s)), nothing changed"
    );
    let result = handler.handle_reorder_task(1, 1).await.unwrap();
    assert_eq!(result, "Task already at that position, nothing changed");
    assert_eq!(ids(&handler.snapshot().store), vec![2, 3, 1]);
}

// テーマ切り替え
#[tokio::test]
async fn test_toggle_theme() {
    let handler = memory_handler();
    assert_eq!(
        handler.handle_toggle_theme().await.unwrap(),
        "Theme switched to dark"
    );
    assert!(handler.snapshot().dark_mode);
    assert!(
        handler
            .handle_list_tasks(None)
            .await
            .unwrap()
            .contains("theme: dark")
    );
    assert_eq!(
        handler.handle_toggle_theme().await.unwrap(),
        "Theme switched to light"
    );
}

// 変更通知
#[tokio::test]
async fn test_subscribers_see_every_change() {
    let handler = memory_handler();
    let mut changes = handler.subscribe();

    handler
        .handle_add_task("buy milk".to_string(), None, None)
        .await
        .unwrap();
    assert!(changes.has_changed().unwrap());
    assert_eq!(ids(&changes.borrow_and_update().store), vec![1, 2, 3, 4]);

    handler.handle_toggle_theme().await.unwrap();
    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().dark_mode);

    handler.handle_list_tasks(None).await.unwrap();
    assert!(!changes.has_changed().unwrap());
}

// ファイルに保存され、再起動後も状態が復元される
#[tokio::test]
async fn test_state_survives_restart() {
    let (handler, temp_dir) = file_handler();
    handler
        .handle_add_task(
            "buy milk".to_string(),
            Some("High".to_string()),
            Some("2024-01-01".to_string()),
        )
        .await
        .unwrap();
    handler.handle_toggle_task(2).await.unwrap();
    handler.handle_remove_task(1).await.unwrap();
    handler.handle_start_edit(3).await.unwrap();
    handler.handle_toggle_theme().await.unwrap();
    drop(handler);

    let reloaded = TodoServerHandler::new(&data_path(&temp_dir), false).unwrap();
    let snapshot = reloaded.snapshot();
    assert_eq!(ids(&snapshot.store), vec![2, 3, 4]);
    assert!(snapshot.store.get(2).unwrap().done);
    assert!(!snapshot.store.get(3).unwrap().editing);
    assert!(snapshot.dark_mode);
}

// 存在しないディレクトリは起動時エラー
#[test]
fn test_missing_directory_is_error() {
    assert!(TodoServerHandler::new("/definitely/not/here/todo.toml", false).is_err());
}
