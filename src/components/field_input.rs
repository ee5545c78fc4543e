//! Labeled form fields shared by the editors and the create forms.

use leptos::prelude::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    /// Report on change (blur / enter) instead of every keystroke, for
    /// values that are normalized when parsed.
    #[prop(optional)] lazy: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| if !lazy { on_input.run(event_target_value(&ev)) }
                on:change=move |ev| if lazy { on_input.run(event_target_value(&ev)) }
            />
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <textarea
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

/// Parses a price input; anything unparseable counts as zero.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or(0.0)
}
