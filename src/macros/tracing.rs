// Macros to instrument (non-future) spans.

#[doc(hidden)]
#[macro_export]
macro_rules! __frontend_span_internal {
    ($trace_type:ident; $($element:expr),*) => {
        #[cfg(feature = "tracing")]
        let myspan = $crate::tracing::span!($crate::tracing::Level::$trace_type, $($element),*);
        #[cfg(feature = "tracing")]
        let _enter = myspan.enter();
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __frontend_span_trace {
    ($($element:expr),*) => {
        $crate::__frontend_span_internal!(TRACE; $($element),*);
    }
}

// Macros to instrument events.

#[doc(hidden)]
#[macro_export]
macro_rules! __frontend_trace_internal {
    ($trace_type:ident; $($element:expr),*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::$trace_type!($($element),*);
        }
        #[cfg(not(feature = "tracing"))]
        {
            $(let _ = &$element;)*
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __frontend_trace {
    ($($element:expr),*) => {{
        $crate::__frontend_trace_internal!(trace; $($element),*)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __frontend_trace_debug {
    ($($element:expr),*) => {{
        $crate::__frontend_trace_internal!(debug; $($element),*)
    }};
}
