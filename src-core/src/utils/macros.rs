// FICHIER : src-core/src/utils/macros.rs

/// Affiche une info à l'utilisateur et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($msg:expr) => {{
        let msg = $msg.to_string();
        println!("{}", msg);
        tracing::info!(event = "user_notification", message = %msg);
    }};
    ($fmt:expr, $($arg:tt)*) => {{
        let msg = format!($fmt, $($arg)*);
        println!("{}", msg);
        tracing::info!(event = "user_notification", message = %msg);
    }};
}

/// Affiche un succès à l'utilisateur
#[macro_export]
macro_rules! user_success {
    ($msg:expr) => {{
        let msg = $msg.to_string();
        println!("✅ {}", msg);
        tracing::info!(event = "user_success", message = %msg);
    }};
    ($fmt:expr, $($arg:tt)*) => {{
        let msg = format!($fmt, $($arg)*);
        println!("✅ {}", msg);
        tracing::info!(event = "user_success", message = %msg);
    }};
}

/// Affiche une erreur à l'utilisateur ET logue la structure technique
#[macro_export]
macro_rules! user_error {
    // Format enrichi : erreur typée + composant + action
    (
        error = $err:expr,
        component = $comp:expr,
        action = $action:expr
    ) => {{
        let err = &$err;
        eprintln!("❌ [{}] {}", $comp, err);
        tracing::error!(
            service = "ram-ateliers", componentName = $comp, action = $action,
            error = ?err, event = "user_error"
        );
    }};
    ($msg:expr) => {{
        let msg = $msg.to_string();
        eprintln!("❌ {}", msg);
        tracing::error!(event = "user_error", message = %msg);
    }};
    ($fmt:expr, $($arg:tt)*) => {{
        let msg = format!($fmt, $($arg)*);
        eprintln!("❌ {}", msg);
        tracing::error!(event = "user_error", message = %msg);
    }};
}
