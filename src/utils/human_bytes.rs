/// Taille mémoire lisible : `36 B`, `72.00 KB`, `1.50 MB`…
///
/// Utilisé dans les logs d'allocation GPU.
pub trait HumanBytes {
    fn human_bytes(&self) -> String;
}

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

fn format_bytes(size: f64) -> String {
    let mut scaled = size;
    let mut unit = None;
    for candidate in UNITS {
        if scaled.abs() < 1024.0 {
            break;
        }
        scaled /= 1024.0;
        unit = Some(candidate);
    }
    match unit {
        Some(unit) => format!("{:.2} {}", scaled, unit),
        None => format!("{} B", size),
    }
}

macro_rules! impl_human_bytes {
    ($($t:ty),*) => {
        $(
            impl HumanBytes for $t {
                fn human_bytes(&self) -> String {
                    format_bytes(*self as f64)
                }
            }
        )*
    };
}

impl_human_bytes!(usize, isize, u64, i64, u32, i32);
