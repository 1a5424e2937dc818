//! Prometheus metrics for comparison runs

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    comparisons: IntCounterVec,
    vendors_per_comparison: Histogram,
}

impl Metrics {
    pub fn new(namespace: &str) -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some(namespace.to_string()), None)?;
        
        let comparisons = IntCounterVec::new(
            Opts::new("comparisons_total", "Comparison runs by outcome"),
            &["outcome"],
        )?;
        let vendors_per_comparison = Histogram::with_opts(
            HistogramOpts::new("vendors_per_comparison", "Vendors evaluated per successful run")
                .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        )?;
        
        registry.register(Box::new(comparisons.clone()))?;
        registry.register(Box::new(vendors_per_comparison.clone()))?;
        
        Ok(Self {
            registry,
            comparisons,
            vendors_per_comparison,
        })
    }
    
    pub fn record_success(&self, vendors: usize) {
        self.comparisons.with_label_values(&["success"]).inc();
        self.vendors_per_comparison.observe(vendors as f64);
    }
    
    pub fn record_failure(&self) {
        self.comparisons.with_label_values(&["failure"]).inc();
    }
    
    /// Text exposition format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            return format!("# Error encoding metrics: {}\n", e);
        }
        String::from_utf8(buffer).unwrap_or_else(|_| "# Error encoding metrics\n".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_rendered_with_namespace() {
        let metrics = Metrics::new("specmatch").unwrap();
        metrics.record_success(3);
        metrics.record_failure();
        metrics.record_failure();
        
        let text = metrics.render();
        assert!(text.contains("specmatch_comparisons_total{outcome=\"success\"} 1"));
        assert!(text.contains("specmatch_comparisons_total{outcome=\"failure\"} 2"));
        assert!(text.contains("specmatch_vendors_per_comparison_count 1"));
    }
}
