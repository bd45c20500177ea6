use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Habit {
    id: String,
    name: String,
    icon: String,
    completed: bool,
    streak: u32,
    completed_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    habit: Habit,
    synced: bool,
}

#[derive(Debug, Deserialize)]
struct CalendarDay {
    date: String,
    status: String,
    is_today: bool,
}

#[derive(Debug, Deserialize)]
struct MonthView {
    month: String,
    prev: String,
    days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    habit: Habit,
    completed_dates: Vec<String>,
    calendar: MonthView,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env_remove("HABITS_REMOTE_URL")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create_habit(client: &Client, server: &TestServer, name: &str) -> Habit {
    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": name, "icon": "💧" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn today(client: &Client, server: &TestServer) -> String {
    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    today.date
}

#[tokio::test]
async fn http_create_and_list_habit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created = create_habit(&client, &server, "  Drink water  ").await;
    assert_eq!(created.name, "Drink water");
    assert_eq!(created.icon, "💧");
    assert!(!created.completed);
    assert_eq!(created.streak, 0);
    assert!(created.completed_dates.is_empty());

    let habits: Vec<Habit> = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(habits.iter().any(|habit| habit.id == created.id));
}

#[tokio::test]
async fn http_blank_name_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_toggle_today_on_and_off() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let habit = create_habit(&client, &server, "Read").await;
    let date = today(&client, &server).await;

    let on: ToggleResponse = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(on.synced);
    assert!(on.habit.completed);
    assert_eq!(on.habit.streak, 1);
    assert_eq!(on.habit.completed_dates, vec![date.clone()]);

    let off: ToggleResponse = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(off.synced);
    assert!(!off.habit.completed);
    assert_eq!(off.habit.streak, 0);
    assert!(off.habit.completed_dates.is_empty());
}

#[tokio::test]
async fn http_history_reports_calendar() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let habit = create_habit(&client, &server, "Stretch").await;
    let date = today(&client, &server).await;

    client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .send()
        .await
        .unwrap();

    let history: HistoryResponse = client
        .get(format!("{}/api/habits/{}/history", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.habit.id, habit.id);
    assert_eq!(history.completed_dates, vec![date.clone()]);
    assert_eq!(history.calendar.month, date[..7]);
    let today_cell = history
        .calendar
        .days
        .iter()
        .find(|day| day.is_today)
        .expect("today in current month");
    assert_eq!(today_cell.date, date);
    assert_eq!(today_cell.status, "success");
    for day in &history.calendar.days {
        let expected = if day.date > date {
            "future"
        } else if day.date == date {
            "success"
        } else {
            "failure"
        };
        assert_eq!(day.status, expected, "{}", day.date);
    }

    let previous: HistoryResponse = client
        .get(format!(
            "{}/api/habits/{}/history?month={}",
            server.base_url, habit.id, history.calendar.prev
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(previous.calendar.days.iter().all(|day| day.status == "failure"));

    let bad = client
        .get(format!("{}/api/habits/{}/history?month=nope", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_update_and_delete_habit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let habit = create_habit(&client, &server, "Guitar").await;

    let updated: Habit = client
        .put(format!("{}/api/habits/{}", server.base_url, habit.id))
        .json(&serde_json::json!({ "name": "Guitar practice", "icon": "🎸" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.name, "Guitar practice");
    assert_eq!(updated.icon, "🎸");

    let deleted = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let history = client
        .get(format!("{}/api/habits/{}/history", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(history.status(), StatusCode::NOT_FOUND);

    let toggle = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(toggle.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_index_serves_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("My Habits"));
    assert!(!body.contains("{{DATE"));
}

#[tokio::test]
async fn http_unknown_path_serves_not_found_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/no/such/page", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.text().await.unwrap();
    assert!(body.contains("Page Not Found"));
    assert!(body.contains(r#"href="/""#));
}
