//! Small styled primitives shared by the views.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Outline => "btn-outline",
            Self::Ghost => "btn-ghost",
            Self::Destructive => "btn-destructive",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] disabled: bool,
    #[props(default)] title: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let variant_class = variant.class();
    rsx! {
        button {
            class: "btn {variant_class} {class}",
            r#type: r#type,
            disabled,
            title: "{title}",
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

/// Label plus an optional inline error below the wrapped control.
#[component]
pub fn Field(
    label: String,
    html_for: String,
    #[props(!optional)] error: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "field",
            label { class: "field-label", r#for: "{html_for}", "{label}" }
            {children}
            if let Some(error) = error {
                p { class: "field-error", "{error}" }
            }
        }
    }
}

#[component]
pub fn Alert(message: String) -> Element {
    rsx! {
        div { class: "alert alert-error", role: "alert", "{message}" }
    }
}
