use gloo_timers::callback::Interval;
use leptos::prelude::*;

/// Local time, updated every second.
#[component]
pub fn Clock() -> impl IntoView {
    let (now, set_now) = signal(current_time());

    let ticker = StoredValue::new_local(Some(Interval::new(1_000, move || {
        set_now.set(current_time());
    })));

    // Dropping the interval cancels it.
    on_cleanup(move || {
        ticker.update_value(|t| {
            t.take();
        });
    });

    view! { <span id="currentTime" class="clock">{move || now.get()}</span> }
}

fn current_time() -> String {
    let date = js_sys::Date::new_0();
    clock_label(date.get_hours(), date.get_minutes(), date.get_seconds())
}

fn clock_label(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_each_field() {
        assert_eq!(clock_label(9, 5, 0), "09:05:00");
        assert_eq!(clock_label(23, 59, 59), "23:59:59");
    }
}
