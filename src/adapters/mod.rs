//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                |
//! |----------------|--------------------|----------------------------|
//! | `hardware`     | SamplerPort        | DHT11 GPIO, ESP32 ADC      |
//! |                | ActuatorPort       | ESP32 GPIO output switches |
//! | `pin_actuator` | ActuatorPort       | any `embedded-hal` pins    |
//! | `log_sink`     | EventSink          | Serial log output          |
//! | `json_sink`    | EventSink          | `telemetry` log target     |
//! | `time`         | ClockPort          | ESP32 system timer         |

pub mod hardware;
pub mod json_sink;
pub mod log_sink;
pub mod pin_actuator;
pub mod time;
