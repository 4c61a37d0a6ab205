// @generated — vendored prost/tonic output for proto/dispatch.proto.
// This is the deterministic code that `tonic_build::compile_protos` would emit
// for dispatch.proto with tonic 0.11 / prost 0.12. It is checked in so the crate
// builds in environments where the `protoc` binary is unavailable. build.rs copies
// this file to `$OUT_DIR/dispatch.rs`, which `tonic::include_proto!("dispatch")`
// includes unchanged.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoPoint {
    #[prost(double, tag = "1")]
    pub lat: f64,
    #[prost(double, tag = "2")]
    pub lng: f64,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateDriverRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub location: ::core::option::Option<GeoPoint>,
    #[prost(string, repeated, tag = "3")]
    pub vehicle_classes: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(double, tag = "4")]
    pub rating: f64,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DriverResponse {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub location: ::core::option::Option<GeoPoint>,
    #[prost(string, tag = "4")]
    pub status: ::prost::alloc::string::String,
    #[prost(double, tag = "5")]
    pub rating: f64,
    #[prost(uint32, tag = "6")]
    pub total_rides: u32,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDriversRequest {}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDriversResponse {
    #[prost(message, repeated, tag = "1")]
    pub drivers: ::prost::alloc::vec::Vec<DriverResponse>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateBookingRequest {
    #[prost(string, tag = "1")]
    pub rider_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub pickup: ::core::option::Option<GeoPoint>,
    #[prost(message, optional, tag = "3")]
    pub dropoff: ::core::option::Option<GeoPoint>,
    #[prost(string, tag = "4")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub vehicle_class: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBookingRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BookingResponse {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub driver_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "4")]
    pub quoted_price: i64,
    #[prost(string, tag = "5")]
    pub zone_id: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WatchBookingEventsRequest {
    #[prost(string, tag = "1")]
    pub booking_id: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BookingEvent {
    #[prost(string, tag = "1")]
    pub booking_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub kind: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub driver_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub offer_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "5")]
    pub price: i64,
}
/// Generated server implementations.
pub mod dispatch_service_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for use with DispatchServiceServer.
    #[async_trait]
    pub trait DispatchService: Send + Sync + 'static {
        async fn create_driver(
            &self,
            request: tonic::Request<super::CreateDriverRequest>,
        ) -> std::result::Result<tonic::Response<super::DriverResponse>, tonic::Status>;
        async fn get_drivers(
            &self,
            request: tonic::Request<super::GetDriversRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetDriversResponse>,
            tonic::Status,
        >;
        async fn create_booking(
            &self,
            request: tonic::Request<super::CreateBookingRequest>,
        ) -> std::result::Result<tonic::Response<super::BookingResponse>, tonic::Status>;
        async fn get_booking(
            &self,
            request: tonic::Request<super::GetBookingRequest>,
        ) -> std::result::Result<tonic::Response<super::BookingResponse>, tonic::Status>;
        /// Server streaming response type for the WatchBookingEvents method.
        type WatchBookingEventsStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<super::BookingEvent, tonic::Status>,
            >
            + Send
            + 'static;
        async fn watch_booking_events(
            &self,
            request: tonic::Request<super::WatchBookingEventsRequest>,
        ) -> std::result::Result<
            tonic::Response<Self::WatchBookingEventsStream>,
            tonic::Status,
        >;
    }
    #[derive(Debug)]
    pub struct DispatchServiceServer<T: DispatchService> {
        inner: _Inner<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    struct _Inner<T>(Arc<T>);
    impl<T: DispatchService> DispatchServiceServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            let inner = _Inner(inner);
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for DispatchServiceServer<T>
    where
        T: DispatchService,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/dispatch.DispatchService/CreateDriver" => {
                    #[allow(non_camel_case_types)]
                    struct CreateDriverSvc<T: DispatchService>(pub Arc<T>);
                    impl<
                        T: DispatchService,
                    > tonic::server::UnaryService<super::CreateDriverRequest>
                    for CreateDriverSvc<T> {
                        type Response = super::DriverResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::CreateDriverRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as DispatchService>::create_driver(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = CreateDriverSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/dispatch.DispatchService/GetDrivers" => {
                    #[allow(non_camel_case_types)]
                    struct GetDriversSvc<T: DispatchService>(pub Arc<T>);
                    impl<
                        T: DispatchService,
                    > tonic::server::UnaryService<super::GetDriversRequest>
                    for GetDriversSvc<T> {
                        type Response = super::GetDriversResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetDriversRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as DispatchService>::get_drivers(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GetDriversSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/dispatch.DispatchService/CreateBooking" => {
                    #[allow(non_camel_case_types)]
                    struct CreateBookingSvc<T: DispatchService>(pub Arc<T>);
                    impl<
                        T: DispatchService,
                    > tonic::server::UnaryService<super::CreateBookingRequest>
                    for CreateBookingSvc<T> {
                        type Response = super::BookingResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::CreateBookingRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as DispatchService>::create_booking(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = CreateBookingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/dispatch.DispatchService/GetBooking" => {
                    #[allow(non_camel_case_types)]
                    struct GetBookingSvc<T: DispatchService>(pub Arc<T>);
                    impl<
                        T: DispatchService,
                    > tonic::server::UnaryService<super::GetBookingRequest>
                    for GetBookingSvc<T> {
                        type Response = super::BookingResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetBookingRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as DispatchService>::get_booking(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = GetBookingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/dispatch.DispatchService/WatchBookingEvents" => {
                    #[allow(non_camel_case_types)]
                    struct WatchBookingEventsSvc<T: DispatchService>(pub Arc<T>);
                    impl<
                        T: DispatchService,
                    > tonic::server::ServerStreamingService<
                        super::WatchBookingEventsRequest,
                    > for WatchBookingEventsSvc<T> {
                        type Response = super::BookingEvent;
                        type ResponseStream = T::WatchBookingEventsStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::WatchBookingEventsRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as DispatchService>::watch_booking_events(&inner, request)
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let inner = inner.0;
                        let method = WatchBookingEventsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        Ok(
                            http::Response::builder()
                                .status(200)
                                .header("grpc-status", "12")
                                .header("content-type", "application/grpc")
                                .body(empty_body())
                                .unwrap(),
                        )
                    })
                }
            }
        }
    }
    impl<T: DispatchService> Clone for DispatchServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    impl<T: DispatchService> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(Arc::clone(&self.0))
        }
    }
    impl<T: DispatchService> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Inner")
        }
    }
    impl<T: DispatchService> tonic::server::NamedService for DispatchServiceServer<T> {
        const NAME: &'static str = "dispatch.DispatchService";
    }
}
