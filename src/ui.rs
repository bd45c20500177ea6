use chrono::NaiveDate;

pub fn render_index(today: NaiveDate) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.to_string())
        .replace("{{DATE_LABEL}}", &today.format("%A, %B %-d").to_string())
}

pub fn render_not_found() -> String {
    NOT_FOUND_HTML.to_string()
}

const NOT_FOUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Page Not Found</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #f5d3a7, transparent 60%),
        linear-gradient(135deg, #f8f3e6, #ffe9d4 60%, #f9f2e9 100%);
      color: #2b2a28;
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      background: rgba(255, 255, 255, 0.86);
      border-radius: 28px;
      box-shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      padding: 36px;
      text-align: center;
      display: grid;
      gap: 14px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    p {
      margin: 0;
      color: #5f5c57;
    }

    a {
      justify-self: center;
      padding: 12px 22px;
      border-radius: 999px;
      background: #ff6b4a;
      color: white;
      font-weight: 600;
      text-decoration: none;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Page Not Found</h1>
    <p>The page you are looking for does not exist.</p>
    <a href="/">Go back home</a>
  </main>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1" />
  <title>My Habit Tracker</title>
  <meta name="description" content="A simple habit tracker to build and keep good habits." />
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --success: #2d7a4b;
      --failure: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 96px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      text-align: center;
      display: grid;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .today-label {
      margin: 0;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .today {
      margin: 0;
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .habits {
      display: grid;
      gap: 12px;
    }

    .empty {
      text-align: center;
      color: #8b857d;
      padding: 28px 0;
    }

    .habit {
      display: flex;
      align-items: center;
      gap: 14px;
      background: white;
      border-radius: 20px;
      padding: 14px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      cursor: pointer;
      transition: box-shadow 150ms ease;
    }

    .habit:hover {
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.12);
    }

    .habit.done {
      background: #eef8f0;
      border-color: rgba(45, 122, 75, 0.25);
    }

    .habit .icon {
      width: 48px;
      height: 48px;
      border-radius: 999px;
      display: grid;
      place-items: center;
      font-size: 1.5rem;
      background: rgba(47, 72, 88, 0.08);
      flex-shrink: 0;
    }

    .habit .body {
      flex: 1;
      min-width: 0;
    }

    .habit .name {
      margin: 0;
      font-size: 1.1rem;
      font-weight: 600;
      overflow-wrap: anywhere;
    }

    .habit.done .name {
      color: #8b857d;
      text-decoration: line-through;
    }

    .habit .streak {
      font-size: 0.8rem;
      font-weight: 600;
      color: #a39d95;
    }

    .habit .streak.hot {
      color: var(--accent);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
      font-family: inherit;
    }

    button:active {
      transform: scale(0.96);
    }

    .icon-btn {
      width: 40px;
      height: 40px;
      background: transparent;
      color: #a39d95;
    }

    .icon-btn:hover {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .check {
      width: 40px;
      height: 40px;
      background: rgba(47, 72, 88, 0.08);
      color: #a39d95;
    }

    .habit.done .check {
      background: var(--success);
      color: white;
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    .fab {
      position: fixed;
      bottom: 28px;
      left: 50%;
      transform: translateX(-50%);
      padding: 16px 28px;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .primary {
      width: 100%;
      padding: 14px 20px;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .primary:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .backdrop {
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.45);
      backdrop-filter: blur(4px);
      display: none;
      place-items: center;
      padding: 18px;
      z-index: 10;
    }

    .backdrop.open {
      display: grid;
    }

    .modal {
      width: min(420px, 100%);
      background: white;
      border-radius: 24px;
      padding: 24px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 18px;
      animation: rise 250ms ease;
    }

    .modal-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .modal-header h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
      margin-bottom: 8px;
    }

    input[type="text"] {
      width: 100%;
      padding: 12px 16px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font: inherit;
    }

    .palette {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .palette button {
      width: 42px;
      height: 42px;
      border-radius: 12px;
      font-size: 1.3rem;
      background: rgba(47, 72, 88, 0.06);
    }

    .palette button.selected {
      background: rgba(255, 107, 74, 0.15);
      box-shadow: inset 0 0 0 2px var(--accent);
    }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .month-nav h3 {
      margin: 0;
      font-size: 1.1rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
    }

    .grid .weekday {
      font-size: 0.75rem;
      color: #a39d95;
      padding: 4px 0;
    }

    .grid .day {
      aspect-ratio: 1;
      border-radius: 10px;
      display: grid;
      place-items: center;
      align-content: center;
      font-size: 0.9rem;
    }

    .grid .day.today {
      background: rgba(47, 72, 88, 0.08);
      font-weight: 600;
    }

    .grid .day.future {
      color: #cfc9c1;
    }

    .grid .mark {
      font-size: 0.6rem;
      font-weight: 600;
    }

    .grid .success .mark {
      color: var(--success);
    }

    .grid .failure .mark {
      color: var(--failure);
    }

    .legend {
      display: flex;
      justify-content: center;
      gap: 20px;
      font-size: 0.85rem;
      color: #6b645d;
    }

    .legend .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 999px;
      margin-right: 6px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: var(--failure);
    }

    .status[data-type="ok"] {
      color: var(--success);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <main class="app" data-today="{{DATE}}">
    <header>
      <h1>My Habits</h1>
      <p class="today-label">Today</p>
      <p class="today" id="today">{{DATE_LABEL}}</p>
    </header>

    <section class="habits" id="habits">
      <p class="empty">Loading...</p>
    </section>

    <div class="status" id="status"></div>
  </main>

  <button class="fab" id="add-btn" type="button">+ New habit</button>

  <div class="backdrop" id="form-modal">
    <form class="modal" id="habit-form">
      <div class="modal-header">
        <h2 id="form-title">New Habit</h2>
        <button class="icon-btn" type="button" data-close="form-modal" aria-label="Close">✕</button>
      </div>
      <div>
        <label for="habit-name">Habit name</label>
        <input type="text" id="habit-name" placeholder="e.g., Drink water" autocomplete="off" />
      </div>
      <div>
        <label>Choose icon</label>
        <div class="palette" id="palette"></div>
      </div>
      <button class="primary" id="form-submit" type="submit" disabled>Create Habit</button>
    </form>
  </div>

  <div class="backdrop" id="history-modal">
    <div class="modal">
      <div class="modal-header">
        <h2 id="history-title"></h2>
        <button class="icon-btn" type="button" data-close="history-modal" aria-label="Close">✕</button>
      </div>
      <div class="month-nav">
        <button class="icon-btn" type="button" id="prev-month" aria-label="Previous month">‹</button>
        <h3 id="month-label"></h3>
        <button class="icon-btn" type="button" id="next-month" aria-label="Next month">›</button>
      </div>
      <div class="grid" id="calendar"></div>
      <div class="legend">
        <span><span class="dot" style="background: var(--success)"></span>Success</span>
        <span><span class="dot" style="background: var(--failure)"></span>Failure</span>
      </div>
    </div>
  </div>

  <script>
    const ICONS = ['💧', '📚', '💪', '🧘', '🍳', '🎸', '💻', '🧹', '💊', '✨'];
    const WEEKDAYS = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];
    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
      'August', 'September', 'October', 'November', 'December'];

    const habitsEl = document.getElementById('habits');
    const statusEl = document.getElementById('status');
    const formModal = document.getElementById('form-modal');
    const formEl = document.getElementById('habit-form');
    const formTitle = document.getElementById('form-title');
    const formSubmit = document.getElementById('form-submit');
    const nameInput = document.getElementById('habit-name');
    const paletteEl = document.getElementById('palette');
    const historyModal = document.getElementById('history-modal');
    const historyTitle = document.getElementById('history-title');
    const monthLabel = document.getElementById('month-label');
    const calendarEl = document.getElementById('calendar');

    let habits = [];
    let editing = null;
    let selectedIcon = ICONS[0];
    let historyHabit = null;
    let historyMonth = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flash = (message, type) => {
      setStatus(message, type);
      setTimeout(() => setStatus('', ''), 1500);
    };

    const api = async (method, path, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(path, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) {
        node.className = className;
      }
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const renderHabits = () => {
      habitsEl.innerHTML = '';
      if (!habits.length) {
        habitsEl.appendChild(el('p', 'empty', 'No habits yet. Add one to get started!'));
        return;
      }

      habits.forEach((habit) => {
        const card = el('div', habit.completed ? 'habit done' : 'habit');
        card.addEventListener('click', () => openHistory(habit));

        card.appendChild(el('div', 'icon', habit.icon));

        const body = el('div', 'body');
        body.appendChild(el('p', 'name', habit.name));
        body.appendChild(el('span', habit.streak > 0 ? 'streak hot' : 'streak', `🔥 ${habit.streak} day streak`));
        card.appendChild(body);

        const edit = el('button', 'icon-btn', '✎');
        edit.type = 'button';
        edit.setAttribute('aria-label', `Edit ${habit.name}`);
        edit.addEventListener('click', (event) => {
          event.stopPropagation();
          openForm(habit);
        });

        const remove = el('button', 'icon-btn', '🗑');
        remove.type = 'button';
        remove.setAttribute('aria-label', `Delete ${habit.name}`);
        remove.addEventListener('click', (event) => {
          event.stopPropagation();
          deleteHabit(habit);
        });

        const check = el('button', 'check', '✓');
        check.type = 'button';
        check.setAttribute('aria-label', `Mark ${habit.name} as ${habit.completed ? 'incomplete' : 'complete'}`);
        check.addEventListener('click', (event) => {
          event.stopPropagation();
          toggleHabit(habit.id);
        });

        card.append(edit, remove, check);
        habitsEl.appendChild(card);
      });
    };

    const syncToday = async () => {
      const { date } = await api('GET', '/api/today');
      const app = document.querySelector('.app');
      if (app.dataset.today === date) {
        return;
      }
      app.dataset.today = date;
      const [year, month, day] = date.split('-').map(Number);
      document.getElementById('today').textContent = new Date(year, month - 1, day)
        .toLocaleDateString('en-US', { weekday: 'long', month: 'long', day: 'numeric' });
    };

    const loadHabits = async () => {
      const [, list] = await Promise.all([syncToday(), api('GET', '/api/habits')]);
      habits = list;
      renderHabits();
    };

    const resync = (err) => {
      setStatus(err.message, 'error');
      loadHabits().catch((inner) => setStatus(inner.message, 'error'));
    };

    const todayKey = () => document.querySelector('.app').dataset.today;

    const toggleHabit = async (id) => {
      const today = todayKey();
      habits = habits.map((habit) => {
        if (habit.id !== id) {
          return habit;
        }
        const completed = !habit.completed;
        const dates = completed
          ? [...habit.completed_dates, today]
          : habit.completed_dates.filter((date) => date !== today);
        const streak = completed ? habit.streak + 1 : Math.max(0, habit.streak - 1);
        return { ...habit, completed, completed_dates: dates, streak };
      });
      renderHabits();

      try {
        const outcome = await api('POST', `/api/habits/${encodeURIComponent(id)}/toggle`);
        if (!outcome.synced) {
          await loadHabits();
          return;
        }
        habits = habits.map((habit) => (habit.id === id ? outcome.habit : habit));
        renderHabits();
      } catch (err) {
        resync(err);
      }
    };

    const deleteHabit = async (habit) => {
      if (!window.confirm('Are you sure you want to delete this habit?')) {
        return;
      }
      try {
        await api('DELETE', `/api/habits/${encodeURIComponent(habit.id)}`);
        habits = habits.filter((item) => item.id !== habit.id);
        renderHabits();
        flash('Deleted', 'ok');
      } catch (err) {
        resync(err);
      }
    };

    const renderPalette = () => {
      paletteEl.innerHTML = '';
      ICONS.forEach((icon) => {
        const button = el('button', icon === selectedIcon ? 'selected' : '', icon);
        button.type = 'button';
        button.addEventListener('click', () => {
          selectedIcon = icon;
          renderPalette();
        });
        paletteEl.appendChild(button);
      });
    };

    const openModal = (modal) => modal.classList.add('open');
    const closeModal = (modal) => modal.classList.remove('open');

    const openForm = (habit) => {
      editing = habit || null;
      nameInput.value = editing ? editing.name : '';
      selectedIcon = editing ? editing.icon : ICONS[0];
      formTitle.textContent = editing ? 'Edit Habit' : 'New Habit';
      formSubmit.textContent = editing ? 'Save Changes' : 'Create Habit';
      formSubmit.disabled = !nameInput.value.trim();
      renderPalette();
      openModal(formModal);
      nameInput.focus();
    };

    nameInput.addEventListener('input', () => {
      formSubmit.disabled = !nameInput.value.trim();
    });

    formEl.addEventListener('submit', async (event) => {
      event.preventDefault();
      const name = nameInput.value.trim();
      if (!name) {
        return;
      }
      const payload = { name, icon: selectedIcon };
      try {
        if (editing) {
          await api('PUT', `/api/habits/${encodeURIComponent(editing.id)}`, payload);
        } else {
          await api('POST', '/api/habits', payload);
        }
        closeModal(formModal);
        editing = null;
        await loadHabits();
        flash('Saved', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const renderCalendar = (history) => {
      const view = history.calendar;
      historyMonth = view.month;
      historyTitle.textContent = `${history.habit.icon} ${history.habit.name}`;
      monthLabel.textContent = `${MONTHS[view.month_number - 1]} ${view.year}`;

      calendarEl.innerHTML = '';
      WEEKDAYS.forEach((name) => calendarEl.appendChild(el('div', 'weekday', name)));
      for (let i = 0; i < view.leading_blanks; i += 1) {
        calendarEl.appendChild(el('div'));
      }
      view.days.forEach((day) => {
        const classes = ['day', day.status];
        if (day.is_today) {
          classes.push('today');
        }
        const cell = el('div', classes.join(' '));
        cell.appendChild(el('span', '', String(day.day)));
        if (day.status !== 'future') {
          cell.appendChild(el('span', 'mark', day.status === 'success' ? 'Success' : 'Failure'));
        }
        calendarEl.appendChild(cell);
      });
    };

    const loadHistory = async (month) => {
      const query = month ? `?month=${month}` : '';
      const history = await api('GET', `/api/habits/${encodeURIComponent(historyHabit.id)}/history${query}`);
      renderCalendar(history);
    };

    const shiftMonth = (month, delta) => {
      const [year, number] = month.split('-').map(Number);
      const index = year * 12 + (number - 1) + delta;
      const nextYear = Math.floor(index / 12);
      const nextMonth = (index % 12) + 1;
      return `${nextYear}-${String(nextMonth).padStart(2, '0')}`;
    };

    const openHistory = (habit) => {
      historyHabit = habit;
      historyMonth = todayKey().slice(0, 7);
      loadHistory(historyMonth)
        .then(() => openModal(historyModal))
        .catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('prev-month').addEventListener('click', () => {
      loadHistory(shiftMonth(historyMonth, -1)).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('next-month').addEventListener('click', () => {
      loadHistory(shiftMonth(historyMonth, 1)).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('add-btn').addEventListener('click', () => openForm(null));

    document.querySelectorAll('[data-close]').forEach((button) => {
      button.addEventListener('click', () => closeModal(document.getElementById(button.dataset.close)));
    });

    [formModal, historyModal].forEach((modal) => {
      modal.addEventListener('click', (event) => {
        if (event.target === modal) {
          closeModal(modal);
        }
      });
    });

    loadHabits().catch((err) => {
      habitsEl.innerHTML = '';
      setStatus(err.message, 'error');
    });

    document.addEventListener('visibilitychange', () => {
      if (document.visibilityState === 'visible') {
        loadHabits().catch((err) => setStatus(err.message, 'error'));
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_today_into_the_page() {
        let html = render_index(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert!(html.contains(r#"data-today="2026-10-18""#));
        assert!(html.contains("Sunday, October 18"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn page_takes_today_and_toggles_from_the_server() {
        let html = render_index(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert!(html.contains("api('GET', '/api/today')"));
        assert!(html.contains("app.dataset.today = date"));
        assert!(html.contains("habit.id === id ? outcome.habit : habit"));
    }

    #[test]
    fn not_found_page_links_home() {
        let html = render_not_found();
        assert!(html.contains("Page Not Found"));
        assert!(html.contains(r#"href="/""#));
    }
}
